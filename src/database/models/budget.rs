use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PlanningOverview;

/// Rate-weighted budget figures for one planning row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BudgetLine {
    pub rate: f64,
    pub planned_budget: f64,
    pub actual_budget: f64,
    pub variance_hours: f64,
    pub variance_budget: f64,
}

impl BudgetLine {
    pub fn compute(planned_hours: f64, actual_hours: f64, rate: f64) -> Self {
        let planned_budget = planned_hours * rate;
        let actual_budget = actual_hours * rate;

        Self {
            rate,
            planned_budget,
            actual_budget,
            variance_hours: actual_hours - planned_hours,
            variance_budget: actual_budget - planned_budget,
        }
    }
}

/// Totals across a set of planning rows.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct BudgetSummary {
    pub total_planned_hours: f64,
    pub total_actual_hours: f64,
    pub total_planned_budget: f64,
    pub total_actual_budget: f64,
    pub variance_hours: f64,
    pub variance_budget: f64,
    pub efficiency_ratio: f64,
}

impl BudgetSummary {
    pub fn add(&mut self, planned_hours: f64, actual_hours: f64, line: &BudgetLine) {
        self.total_planned_hours += planned_hours;
        self.total_actual_hours += actual_hours;
        self.total_planned_budget += line.planned_budget;
        self.total_actual_budget += line.actual_budget;
        self.variance_hours = self.total_actual_hours - self.total_planned_hours;
        self.variance_budget = self.total_actual_budget - self.total_planned_budget;
        self.efficiency_ratio = efficiency_ratio(self.total_planned_hours, self.total_actual_hours);
    }

    pub fn from_overviews<'a>(rows: impl IntoIterator<Item = &'a PlanningOverview>) -> Self {
        rows.into_iter().fold(Self::default(), |mut summary, item| {
            summary.add(item.row.planned_hours, item.row.actual_hours, &item.budget);
            summary
        })
    }
}

/// actual / planned, defined as 0 when nothing was planned.
pub fn efficiency_ratio(planned_hours: f64, actual_hours: f64) -> f64 {
    if planned_hours > 0.0 {
        actual_hours / planned_hours
    } else {
        0.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekBudget {
    pub week_start_date: NaiveDate,
    pub summary: BudgetSummary,
    pub details: Vec<PlanningOverview>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetPeriod {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectBudget {
    pub project_id: i64,
    pub period: BudgetPeriod,
    pub summary: BudgetSummary,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_line_multiplies_hours_by_rate() {
        let line = BudgetLine::compute(40.0, 36.0, 50.0);

        assert_eq!(
            line,
            BudgetLine {
                rate: 50.0,
                planned_budget: 2000.0,
                actual_budget: 1800.0,
                variance_hours: -4.0,
                variance_budget: -200.0,
            }
        );
    }

    #[test]
    fn test_missing_rate_yields_zero_budget() {
        let line = BudgetLine::compute(10.0, 12.0, 0.0);
        assert_eq!(line.planned_budget, 0.0);
        assert_eq!(line.actual_budget, 0.0);
        assert_eq!(line.variance_hours, 2.0);
    }

    #[test]
    fn test_efficiency_ratio_is_zero_without_plan() {
        assert_eq!(efficiency_ratio(0.0, 0.0), 0.0);
        assert_eq!(efficiency_ratio(0.0, 17.5), 0.0);
        assert_eq!(efficiency_ratio(20.0, 30.0), 1.5);
    }

    #[test]
    fn test_summary_accumulates_rows() {
        let mut summary = BudgetSummary::default();
        summary.add(40.0, 30.0, &BudgetLine::compute(40.0, 30.0, 50.0));
        summary.add(10.0, 20.0, &BudgetLine::compute(10.0, 20.0, 100.0));

        assert_eq!(summary.total_planned_hours, 50.0);
        assert_eq!(summary.total_actual_hours, 50.0);
        assert_eq!(summary.total_planned_budget, 3000.0);
        assert_eq!(summary.total_actual_budget, 3500.0);
        assert_eq!(summary.variance_hours, 0.0);
        assert_eq!(summary.variance_budget, 500.0);
        assert_eq!(summary.efficiency_ratio, 1.0);
    }

    #[test]
    fn test_empty_summary_is_all_zero() {
        let summary = BudgetSummary::from_overviews(&Vec::<PlanningOverview>::new());
        assert_eq!(summary, BudgetSummary::default());
    }
}
