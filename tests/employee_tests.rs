use actix_web::{App, http::StatusCode, test};
use pretty_assertions::assert_eq;
use serde_json::json;

mod common;
use common::read_json;

#[actix_web::test]
async fn test_create_and_get_employee() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({
            "name": "Grace Hopper",
            "email": "Grace@Navy.mil",
            "position": "Admiral"
        }))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["email"], "grace@navy.mil");
    assert_eq!(body["data"]["is_active"], true);

    let id = body["data"]["id"].as_i64().unwrap();
    let req = test::TestRequest::get()
        .uri(&format!("/api/employees/{}", id))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Grace Hopper");
}

#[actix_web::test]
async fn test_create_employee_validation() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({ "name": "No Email", "position": "Tester" }))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Missing required field: email");

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({ "name": "Bad", "email": "not-an-email", "position": "Tester" }))
        .to_request();
    let (status, _) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    common::assert_record_count(&ctx.pool, "employees", 0).await;
}

#[actix_web::test]
async fn test_duplicate_email_conflicts() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let existing = ctx.seed_employee().await;
    let other = ctx.seed_employee().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/employees")
        .set_json(json!({
            "name": "Copycat",
            "email": existing.email.to_uppercase(),
            "position": "Engineer"
        }))
        .to_request();
    let (status, _) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Updating another employee onto a taken email is a conflict too
    let req = test::TestRequest::put()
        .uri(&format!("/api/employees/{}", other.id))
        .set_json(json!({
            "name": other.name,
            "email": existing.email,
            "position": "Engineer"
        }))
        .to_request();
    let (status, _) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Keeping your own email is fine
    let req = test::TestRequest::put()
        .uri(&format!("/api/employees/{}", other.id))
        .set_json(json!({
            "name": "Renamed",
            "email": other.email,
            "position": "Lead"
        }))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["position"], "Lead");
}

#[actix_web::test]
async fn test_unknown_employee_is_not_found() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    for req in [
        test::TestRequest::get()
            .uri("/api/employees/404")
            .to_request(),
        test::TestRequest::delete()
            .uri("/api/employees/404")
            .to_request(),
        test::TestRequest::get()
            .uri("/api/employees/404/rates")
            .to_request(),
        test::TestRequest::put()
            .uri("/api/employees/404")
            .set_json(json!({ "name": "X", "email": "x@example.com", "position": "Y" }))
            .to_request(),
        test::TestRequest::post()
            .uri("/api/employees/404/rates")
            .set_json(json!({ "rate_per_hour": 50.0, "effective_from": "2024-01-01" }))
            .to_request(),
    ] {
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
    }

    common::assert_record_count(&ctx.pool, "rate_history", 0).await;
}

#[actix_web::test]
async fn test_malformed_path_is_bad_request() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri("/api/employees/abc")
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn test_deactivate_hides_from_default_list() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let staying = ctx.seed_employee_named("Alice").await;
    let leaving = ctx.seed_employee_named("Bob").await;
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::delete()
        .uri(&format!("/api/employees/{}", leaving.id))
        .to_request();
    let (status, _) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);

    let req = test::TestRequest::get().uri("/api/employees").to_request();
    let (_, body) = read_json(test::call_service(&app, req).await).await;
    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![staying.id]);

    let req = test::TestRequest::get()
        .uri("/api/employees?active_only=false")
        .to_request();
    let (_, body) = read_json(test::call_service(&app, req).await).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alice", "Bob"]);

    // Soft delete keeps the row
    common::assert_record_count(&ctx.pool, "employees", 2).await;
}

#[actix_web::test]
async fn test_new_open_rate_closes_previous() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let employee = ctx.seed_employee().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    for (rate, from) in [(50.0, "2024-01-01"), (60.0, "2024-03-01")] {
        let req = test::TestRequest::post()
            .uri(&format!("/api/employees/{}/rates", employee.id))
            .set_json(json!({ "rate_per_hour": rate, "effective_from": from }))
            .to_request();
        let (status, _) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/employees/{}/rates", employee.id))
        .to_request();
    let (_, body) = read_json(test::call_service(&app, req).await).await;
    let rates = body["data"].as_array().unwrap();

    assert_eq!(rates.len(), 2);
    assert_eq!(rates[0]["rate_per_hour"], 60.0);
    assert_eq!(rates[0]["effective_to"], serde_json::Value::Null);
    assert_eq!(rates[1]["rate_per_hour"], 50.0);
    assert_eq!(rates[1]["effective_to"], "2024-02-29");

    for (day, expected) in [("2024-02-15", 50.0), ("2024-03-01", 60.0), ("2023-12-31", 0.0)] {
        let req = test::TestRequest::get()
            .uri(&format!("/api/employees/{}/rates/current?date={}", employee.id, day))
            .to_request();
        let (status, body) = read_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["rate_per_hour"], expected, "rate on {}", day);
    }
}

#[actix_web::test]
async fn test_closed_rate_leaves_open_row_alone() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let employee = ctx.seed_employee().await;
    ctx.seed_rate(employee.id, 50.0, "2024-01-01").await;
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/employees/{}/rates", employee.id))
        .set_json(json!({
            "rate_per_hour": 75.0,
            "effective_from": "2024-07-01",
            "effective_to": "2024-07-31"
        }))
        .to_request();
    let (status, _) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::CREATED);

    let open_rows = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM rate_history WHERE employee_id = ? AND effective_to IS NULL",
    )
    .bind(employee.id)
    .fetch_one(&ctx.pool)
    .await
    .unwrap();
    assert_eq!(open_rows, 1);

    let rate = ctx
        .state
        .rate_history_repository
        .rate_on(employee.id, common::date("2024-07-15"))
        .await
        .unwrap();
    assert_eq!(rate, 75.0);

    let rate = ctx
        .state
        .rate_history_repository
        .rate_on(employee.id, common::date("2024-08-01"))
        .await
        .unwrap();
    assert_eq!(rate, 50.0);
}

#[actix_web::test]
async fn test_invalid_rate_is_rejected() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let employee = ctx.seed_employee().await;
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri(&format!("/api/employees/{}/rates", employee.id))
        .set_json(json!({ "rate_per_hour": 0, "effective_from": "2024-01-01" }))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Rate per hour must be greater than 0");
    common::assert_record_count(&ctx.pool, "rate_history", 0).await;
}

#[actix_web::test]
async fn test_workload_groups_by_week() {
    common::setup_test_env();
    let ctx = common::TestContext::new().await.unwrap();
    let employee = ctx.seed_employee().await;
    let apollo = ctx.seed_project().await;
    let gemini = ctx.seed_project().await;
    ctx.seed_planning(employee.id, apollo.id, "2024-03-04", 20.0)
        .await;
    ctx.seed_planning(employee.id, gemini.id, "2024-03-04", 15.0)
        .await;
    ctx.seed_planning(employee.id, apollo.id, "2024-03-11", 30.0)
        .await;
    ctx.seed_time_entry(employee.id, apollo.id, "2024-03-05", 6.0)
        .await;
    let app = test::init_service(App::new().configure(|cfg| ctx.state.configure(cfg))).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/employees/{}/workload", employee.id))
        .to_request();
    let (status, body) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);

    let weeks = body["data"].as_array().unwrap();
    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0]["week_start_date"], "2024-03-11");
    assert_eq!(weeks[0]["project_count"], 1);
    assert_eq!(weeks[1]["week_start_date"], "2024-03-04");
    assert_eq!(weeks[1]["total_planned_hours"], 35.0);
    assert_eq!(weeks[1]["total_actual_hours"], 6.0);
    assert_eq!(weeks[1]["project_count"], 2);

    let req = test::TestRequest::get()
        .uri(&format!(
            "/api/employees/{}/workload?start_date=2024-03-10",
            employee.id
        ))
        .to_request();
    let (_, body) = read_json(test::call_service(&app, req).await).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}
