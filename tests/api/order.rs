use diesel::{ExpressionMethods, QueryDsl, RunQueryDsl};
use flowershop::schema::{order_flowers, orders};
use uuid::Uuid;

use crate::helpers::{create_customer_and_employee, create_supplier_and_flower, get_flower_stock, TestApp};

#[actix_web::test]
pub async fn post_order_creates_order_and_decrements_stock(){
    let app = TestApp::spawn_app().await;

    let (_, flower_id) = create_supplier_and_flower(&app, 10, 4.5);
    let (customer_id, employee_id) = create_customer_and_employee(&app);

    let order_data = serde_json::json!({
        "customer_id": customer_id,
        "employee_id": employee_id,
        "items": [
            {
                "flower_id": flower_id,
                "quantity": 3_i32,
                "unit_price": 4.5_f64
            }
        ]
    });

    let response = app.post_order(&order_data).await;
    assert_eq!(response.status().as_u16(), 200);

    let order_id = response.json::<Uuid>().await.unwrap();

    assert_eq!(get_flower_stock(&app, flower_id), 7);

    let mut conn = app.pool.get().unwrap();

    let quantity: i32 = order_flowers::table
        .filter(order_flowers::order_id.eq(order_id))
        .filter(order_flowers::flower_id.eq(flower_id))
        .select(order_flowers::quantity)
        .first::<i32>(&mut conn)
        .unwrap();

    assert_eq!(quantity, 3);
}

#[actix_web::test]
pub async fn line_item_exceeding_stock_is_rejected_and_stock_unchanged(){
    let app = TestApp::spawn_app().await;

    let (_, flower_id) = create_supplier_and_flower(&app, 10, 4.5);
    let (customer_id, employee_id) = create_customer_and_employee(&app);

    let order_data = serde_json::json!({
        "customer_id": customer_id,
        "employee_id": employee_id,
        "items": [
            {
                "flower_id": flower_id,
                "quantity": 3_i32,
                "unit_price": 4.5_f64
            }
        ]
    });

    let response = app.post_order(&order_data).await;
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(get_flower_stock(&app, flower_id), 7);

    let order_id = response.json::<Uuid>().await.unwrap();

    // 8 > 7 left in stock, the insertion must be rejected outright
    let item_data = serde_json::json!({
        "order_id": order_id,
        "flower_id": flower_id,
        "quantity": 8_i32,
        "unit_price": 4.5_f64
    });

    let response = app.post_order_item(&item_data).await;
    assert_eq!(response.status().as_u16(), 400);
    assert_eq!(get_flower_stock(&app, flower_id), 7);
}

#[actix_web::test]
pub async fn order_referencing_unknown_flower_is_rejected(){
    let app = TestApp::spawn_app().await;

    let (customer_id, employee_id) = create_customer_and_employee(&app);

    let order_data = serde_json::json!({
        "customer_id": customer_id,
        "employee_id": employee_id,
        "items": [
            {
                "flower_id": Uuid::new_v4(),
                "quantity": 1_i32,
                "unit_price": 4.5_f64
            }
        ]
    });

    let response = app.post_order(&order_data).await;
    assert_eq!(response.status().as_u16(), 400);

    let mut conn = app.pool.get().unwrap();

    let rows: i64 = orders::table
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap();

    assert_eq!(rows, 0);
}

#[actix_web::test]
pub async fn failing_line_item_rolls_back_the_whole_order(){
    let app = TestApp::spawn_app().await;

    let (_, rose_id) = create_supplier_and_flower(&app, 50, 4.5);
    let (_, tulip_id) = create_supplier_and_flower(&app, 5, 6.0);
    let (customer_id, employee_id) = create_customer_and_employee(&app);

    let order_data = serde_json::json!({
        "customer_id": customer_id,
        "employee_id": employee_id,
        "items": [
            {
                "flower_id": rose_id,
                "quantity": 10_i32,
                "unit_price": 4.5_f64
            },
            {
                "flower_id": tulip_id,
                "quantity": 8_i32,
                "unit_price": 6.0_f64
            }
        ]
    });

    let response = app.post_order(&order_data).await;
    assert_eq!(response.status().as_u16(), 400);

    // The rose decrement ran before the tulip guard fired, the rollback
    // must undo it
    assert_eq!(get_flower_stock(&app, rose_id), 50);
    assert_eq!(get_flower_stock(&app, tulip_id), 5);

    let mut conn = app.pool.get().unwrap();

    let rows: i64 = orders::table
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap();

    assert_eq!(rows, 0);
}

#[actix_web::test]
pub async fn order_without_line_items_is_rejected(){
    let app = TestApp::spawn_app().await;

    let (customer_id, employee_id) = create_customer_and_employee(&app);

    let order_data = serde_json::json!({
        "customer_id": customer_id,
        "employee_id": employee_id,
        "items": []
    });

    let response = app.post_order(&order_data).await;
    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
pub async fn delete_order_removes_line_items_but_not_stock(){
    let app = TestApp::spawn_app().await;

    let (_, flower_id) = create_supplier_and_flower(&app, 10, 4.5);
    let (customer_id, employee_id) = create_customer_and_employee(&app);

    let order_data = serde_json::json!({
        "customer_id": customer_id,
        "employee_id": employee_id,
        "items": [
            {
                "flower_id": flower_id,
                "quantity": 3_i32,
                "unit_price": 4.5_f64
            }
        ]
    });

    let response = app.post_order(&order_data).await;
    assert_eq!(response.status().as_u16(), 200);

    let order_id = response.json::<Uuid>().await.unwrap();

    let response = app.api_client.delete(format!("{}/order", app.get_app_url()))
        .json(&serde_json::json!({ "order_id": order_id }))
        .send()
        .await
        .expect("Failed to send request to order endpoint");

    assert_eq!(response.status().as_u16(), 200);

    let mut conn = app.pool.get().unwrap();

    let rows: i64 = order_flowers::table
        .filter(order_flowers::order_id.eq(order_id))
        .count()
        .get_result::<i64>(&mut conn)
        .unwrap();

    assert_eq!(rows, 0);
    // Deleting an order is not a restock
    assert_eq!(get_flower_stock(&app, flower_id), 7);
}

#[actix_web::test]
pub async fn update_order_status_changes_status(){
    let app = TestApp::spawn_app().await;

    let (_, flower_id) = create_supplier_and_flower(&app, 10, 4.5);
    let (customer_id, employee_id) = create_customer_and_employee(&app);

    let order_data = serde_json::json!({
        "customer_id": customer_id,
        "employee_id": employee_id,
        "items": [
            {
                "flower_id": flower_id,
                "quantity": 2_i32,
                "unit_price": 4.5_f64
            }
        ]
    });

    let response = app.post_order(&order_data).await;
    assert_eq!(response.status().as_u16(), 200);

    let order_id = response.json::<Uuid>().await.unwrap();

    let response = app.api_client.post(format!("{}/order/status", app.get_app_url()))
        .form(&serde_json::json!({
            "order_id": order_id,
            "status": "prepared"
        }))
        .send()
        .await
        .expect("Failed to send request to order status endpoint");

    assert_eq!(response.status().as_u16(), 200);

    let mut conn = app.pool.get().unwrap();

    let status: String = orders::table
        .filter(orders::order_id.eq(order_id))
        .select(orders::status)
        .first::<String>(&mut conn)
        .unwrap();

    assert_eq!(status, "prepared");
}

#[actix_web::test]
pub async fn update_order_status_with_unknown_order_id_fails(){
    let app = TestApp::spawn_app().await;

    let response = app.api_client.post(format!("{}/order/status", app.get_app_url()))
        .form(&serde_json::json!({
            "order_id": Uuid::new_v4(),
            "status": "delivered"
        }))
        .send()
        .await
        .expect("Failed to send request to order status endpoint");

    assert_eq!(response.status().as_u16(), 400);
}

#[actix_web::test]
pub async fn get_order_returns_order_with_line_items(){
    let app = TestApp::spawn_app().await;

    let (_, flower_id) = create_supplier_and_flower(&app, 25, 4.5);
    let (customer_id, employee_id) = create_customer_and_employee(&app);

    let order_data = serde_json::json!({
        "customer_id": customer_id,
        "employee_id": employee_id,
        "items": [
            {
                "flower_id": flower_id,
                "quantity": 5_i32,
                "unit_price": 4.5_f64
            }
        ]
    });

    let response = app.post_order(&order_data).await;
    assert_eq!(response.status().as_u16(), 200);

    let response = app.api_client.get(format!(
            "{}/order?page=1&limit=10&customer_id={}",
            app.get_app_url(),
            customer_id
        ))
        .send()
        .await
        .expect("Failed to send request to order endpoint");

    assert_eq!(response.status().as_u16(), 200);

    let body = response.json::<serde_json::Value>().await.unwrap();
    let orders = body.as_array().unwrap();

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["status"], "pending");
    assert_eq!(orders[0]["items"][0]["flower_id"], serde_json::json!(flower_id));
    assert_eq!(orders[0]["items"][0]["quantity"], 5);
}
