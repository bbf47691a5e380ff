pub mod budget;
pub mod hours;
pub mod rates;
pub mod week;

pub use budget::BudgetCalculator;
pub use hours::recompute_actual_hours;
pub use rates::resolve_rate;
