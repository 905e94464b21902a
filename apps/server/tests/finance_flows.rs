mod common;

use axum::http::{header, Method, StatusCode};
use serde_json::{json, Value};

use common::TestApp;

async fn add_transaction(app: &TestApp, token: &str, body: Value) -> Value {
    let (status, created) = app
        .send(Method::POST, "/api/v1/transactions", Some(token), Some(body))
        .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {created}");
    created
}

#[tokio::test]
async fn transactions_crud_filters_and_isolation() {
    let app = common::spawn_app().await;
    let token = app.register("tom@example.com").await;
    let other = app.register("uma@example.com").await;

    let salary = add_transaction(
        &app,
        &token,
        json!({ "amount": 3000, "category": "Salary", "date": "2024-03-01", "type": "income" }),
    )
    .await;
    assert_eq!(salary["type"], "income");
    let groceries = add_transaction(
        &app,
        &token,
        json!({ "amount": 120.5, "category": "Groceries", "date": "2024-03-05", "notes": "weekly shop" }),
    )
    .await;
    assert_eq!(groceries["type"], "expense");
    add_transaction(
        &app,
        &token,
        json!({ "amount": 80, "category": "Groceries", "date": "2024-02-20" }),
    )
    .await;

    let (status, all) = app
        .send(Method::GET, "/api/v1/transactions", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let dates: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-05", "2024-03-01", "2024-02-20"]);

    let (_, march_expenses) = app
        .send(
            Method::GET,
            "/api/v1/transactions?type=expense&startDate=2024-03-01&endDate=2024-03-31",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(march_expenses.as_array().unwrap().len(), 1);

    // Missing required fields
    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/transactions",
            Some(&token),
            Some(json!({ "amount": 10 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/transactions",
            Some(&token),
            Some(json!({ "amount": -5, "category": "Oops", "date": "2024-03-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = groceries["id"].as_str().unwrap();
    let uri = format!("/api/v1/transactions/{id}");

    let (status, updated) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({ "amount": 99.99 })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"].as_f64(), Some(99.99));
    assert_eq!(updated["category"], "Groceries");

    // Another user's record behaves as missing.
    let (status, _) = app.send(Method::GET, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, balance) = app
        .send(Method::GET, "/api/v1/transactions/balance", Some(&token), None)
        .await;
    assert_eq!(balance["income"].as_f64(), Some(3000.0));
    assert_eq!(balance["expenses"].as_f64(), Some(80.0));
    assert_eq!(balance["balance"].as_f64(), Some(2920.0));

    let (_, spending) = app
        .send(
            Method::GET,
            "/api/v1/transactions/spending-by-category",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(spending[0]["category"], "Groceries");
    assert_eq!(spending[0]["count"], 1);
}

#[tokio::test]
async fn categories_are_unique_per_user() {
    let app = common::spawn_app().await;
    let token = app.register("vic@example.com").await;
    let other = app.register("wes@example.com").await;

    let (status, rent) = app
        .send(
            Method::POST,
            "/api/v1/categories",
            Some(&token),
            Some(json!({ "name": " Rent " })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(rent["name"], "Rent");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/categories",
            Some(&token),
            Some(json!({ "name": "Rent" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/categories",
            Some(&other),
            Some(json!({ "name": "Rent" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/categories",
            Some(&token),
            Some(json!({ "name": "   " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/categories/{}", rent["id"].as_str().unwrap());
    let (status, renamed) = app
        .send(Method::PUT, &uri, Some(&token), Some(json!({ "name": "Housing" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(renamed["name"], "Housing");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn budgets_reject_duplicates_and_report_status() {
    let app = common::spawn_app().await;
    let token = app.register("xia@example.com").await;

    let (status, budget) = app
        .send(
            Method::POST,
            "/api/v1/budgets",
            Some(&token),
            Some(json!({ "category": "Food", "amount": 500 })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(budget["period"], "monthly");

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/budgets",
            Some(&token),
            Some(json!({ "category": "Food", "amount": 100, "period": "weekly" })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Budget for this category already exists");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/budgets",
            Some(&token),
            Some(json!({ "category": "Fun", "amount": 100, "period": "daily" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, statuses) = app
        .send(Method::GET, "/api/v1/budgets/status", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(statuses[0]["category"], "Food");
    assert_eq!(statuses[0]["spent"].as_f64(), Some(0.0));
    assert_eq!(statuses[0]["status"], "ok");

    let uri = format!("/api/v1/budgets/{}", budget["id"].as_str().unwrap());
    let (status, updated) = app
        .send(
            Method::PUT,
            &uri,
            Some(&token),
            Some(json!({ "amount": 650, "period": "yearly" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["amount"].as_f64(), Some(650.0));
    assert_eq!(updated["period"], "yearly");

    let (status, _) = app.send(Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn goals_lifecycle_with_contributions() {
    let app = common::spawn_app().await;
    let token = app.register("yan@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/goals",
            Some(&token),
            Some(json!({ "title": "Vacation" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Title, target amount, and target date are required"
    );

    let (status, goal) = app
        .send(
            Method::POST,
            "/api/v1/goals",
            Some(&token),
            Some(json!({ "title": "Vacation", "targetAmount": 1000, "targetDate": "2030-06-01" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["category"], "General Savings");
    assert_eq!(goal["icon"], "piggy-bank");
    assert_eq!(goal["isCompleted"], false);

    let contribute_uri = format!("/api/v1/goals/{}/contribute", goal["id"].as_str().unwrap());
    let (status, body) = app
        .send(
            Method::POST,
            &contribute_uri,
            Some(&token),
            Some(json!({ "amount": 0 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Valid contribution amount is required");

    let (status, after) = app
        .send(
            Method::POST,
            &contribute_uri,
            Some(&token),
            Some(json!({ "amount": 1000, "note": "bonus" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(after["currentAmount"].as_f64(), Some(1000.0));
    assert_eq!(after["isCompleted"], true);
    assert_eq!(after["contributionHistory"][0]["note"], "bonus");

    let goal_uri = format!("/api/v1/goals/{}", goal["id"].as_str().unwrap());
    let (status, updated) = app
        .send(
            Method::PUT,
            &goal_uri,
            Some(&token),
            Some(json!({ "targetAmount": 5000 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isCompleted"], false);
    assert_eq!(updated["contributionHistory"].as_array().unwrap().len(), 1);

    let (status, _) = app.send(Method::DELETE, &goal_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.send(Method::GET, &goal_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn monthly_reports() {
    let app = common::spawn_app().await;
    let token = app.register("zoe@example.com").await;

    for body in [
        json!({ "amount": 4000, "category": "Salary", "date": "2024-01-31", "type": "income" }),
        json!({ "amount": 1000, "category": "Rent", "date": "2024-01-01" }),
        json!({ "amount": 250, "category": "Food", "date": "2024-01-15" }),
        json!({ "amount": 50, "category": "Food", "date": "2023-12-31" }),
    ] {
        add_transaction(&app, &token, body).await;
    }
    app.send(
        Method::POST,
        "/api/v1/budgets",
        Some(&token),
        Some(json!({ "category": "Food", "amount": 300 })),
    )
    .await;

    let (status, summary) = app
        .send(
            Method::GET,
            "/api/v1/analytics/monthly-summary?month=1&year=2024",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["income"].as_f64(), Some(4000.0));
    assert_eq!(summary["expenses"].as_f64(), Some(1250.0));
    assert_eq!(summary["savings"].as_f64(), Some(2750.0));
    assert_eq!(summary["savingsRate"].as_f64(), Some(68.75));

    let (_, breakdown) = app
        .send(
            Method::GET,
            "/api/v1/analytics/category-breakdown?month=1&year=2024",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(breakdown["type"], "expense");
    assert_eq!(breakdown["total"].as_f64(), Some(1250.0));
    assert_eq!(breakdown["categories"][0]["category"], "Rent");
    assert_eq!(breakdown["categories"][0]["percentage"].as_f64(), Some(80.0));

    let (_, trend) = app
        .send(
            Method::GET,
            "/api/v1/analytics/monthly-trend?month=1&year=2024",
            Some(&token),
            None,
        )
        .await;
    let trend = trend.as_array().unwrap();
    assert_eq!(trend.len(), 6);
    assert_eq!((trend[0]["year"].as_i64(), trend[0]["month"].as_i64()), (Some(2023), Some(8)));
    assert_eq!(trend[4]["expenses"].as_f64(), Some(50.0));
    assert_eq!(trend[5]["savings"].as_f64(), Some(2750.0));

    let (_, comparison) = app
        .send(
            Method::GET,
            "/api/v1/analytics/budget-vs-actual?month=1&year=2024",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(comparison["comparison"][0]["actual"].as_f64(), Some(250.0));
    assert_eq!(comparison["comparison"][0]["difference"].as_f64(), Some(50.0));
    assert_eq!(comparison["comparison"][0]["status"], "warning");

    let (status, _) = app
        .send(
            Method::GET,
            "/api/v1/analytics/monthly-summary?month=13&year=2024",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn csv_exports() {
    let app = common::spawn_app().await;
    let token = app.register("amy@example.com").await;
    add_transaction(
        &app,
        &token,
        json!({ "amount": 42.5, "category": "Books", "date": "2024-05-04", "notes": "novel" }),
    )
    .await;
    add_transaction(
        &app,
        &token,
        json!({ "amount": 10, "category": "Coffee", "date": "2024-06-01" }),
    )
    .await;

    let response = app
        .raw(
            Method::GET,
            "/api/v1/export/transactions?startDate=2024-05-01&endDate=2024-05-31",
            Some(&token),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=transactions.csv"
    );
    let text = String::from_utf8(response.body).unwrap();
    assert_eq!(
        text,
        "Date,Type,Category,Amount,Notes\n2024-05-04,expense,Books,42.5,novel\n"
    );

    let response = app
        .raw(Method::GET, "/api/v1/export/goals", Some(&token), None)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let text = String::from_utf8(response.body).unwrap();
    assert_eq!(
        text,
        "Title,Target Amount,Current Amount,Target Date,Category,Description,Is Completed\n"
    );

    let response = app
        .raw(Method::GET, "/api/v1/export/budgets", None, None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}
