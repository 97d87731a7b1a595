// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    clear_slot, compare, dataset, health_check, latest_dataset, list_history, select_slot, workspace,
};
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/history", get(list_history))
        .route("/datasets/latest", get(latest_dataset))
        .route("/datasets/:id", get(dataset))
        .route("/compare", get(compare))
        .route("/comparison", get(workspace))
        .route("/comparison/slots/:slot", put(select_slot).delete(clear_slot))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dataset_repository::fake::FakeRepository;
    use crate::application::dataset_service::DatasetService;
    use crate::domain::comparison::ScoringConfig;
    use crate::domain::equipment::{EquipmentRecord, RecordSet};
    use crate::domain::history::HistoryEntry;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use std::time::Duration;

    fn records(rows: &[(&str, &str, f64, f64, f64)]) -> RecordSet {
        RecordSet::new(
            rows.iter()
                .enumerate()
                .map(|(i, (name, t, f, p, temp))| EquipmentRecord::new(i as i64 + 1, *name, *t, *f, *p, *temp))
                .collect(),
        )
    }

    fn repository() -> FakeRepository {
        let mut repo = FakeRepository::default()
            .with_dataset(1, records(&[("Pump-1", "Pump", 10.0, 5.0, 100.0), ("Pump-2", "Pump", 20.0, 5.0, 100.0)]))
            .with_dataset(2, records(&[("Pump-3", "Pump", 5.0, 5.0, 100.0), ("Valve-1", "Valve", 10.0, 5.0, 100.0)]))
            .with_dataset(3, records(&[("Dry-1", "Pump", 12.0, 0.0, 80.0)]))
            .with_dataset(4, RecordSet::default());
        repo.latest = Some(2);
        repo.history = vec![HistoryEntry {
            id: 2,
            filename: "plant_b.csv".to_string(),
            uploaded_at: Utc.with_ymd_and_hms(2026, 2, 1, 8, 0, 0).unwrap(),
            total_count: 2,
            avg_flowrate: 7.5,
            avg_pressure: 5.0,
            avg_temperature: 100.0,
        }];
        repo.failing.push(9);
        repo
    }

    async fn spawn_app(repo: FakeRepository) -> SocketAddr {
        let service = DatasetService::new(Arc::new(repo), ScoringConfig::default());
        let app = build_router(Arc::new(AppState::new(service)));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        addr
    }

    async fn get_json(addr: SocketAddr, path: &str) -> (u16, Value) {
        let response = reqwest::get(format!("http://{}{}", addr, path)).await.unwrap();
        let status = response.status().as_u16();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn test_health_and_history() {
        let addr = spawn_app(repository()).await;

        let body = reqwest::get(format!("http://{}/healthz", addr)).await.unwrap().text().await.unwrap();
        assert_eq!(body, "ok");

        let (status, history) = get_json(addr, "/history").await;
        assert_eq!(status, 200);
        assert_eq!(history[0]["filename"], "plant_b.csv");
    }

    #[tokio::test]
    async fn test_dataset_views() {
        let addr = spawn_app(repository()).await;

        let (status, latest) = get_json(addr, "/datasets/latest").await;
        assert_eq!(status, 200);
        assert_eq!(latest["summary"]["total_count"], 2);
        assert_eq!(latest["summary"]["equipment_type_distribution"], json!({"Pump": 1, "Valve": 1}));
        assert_eq!(latest["charts"][0]["kind"], "pie");

        let (status, one) = get_json(addr, "/datasets/1").await;
        assert_eq!(status, 200);
        assert_eq!(one["display"][0]["mean"], "15.00");
        assert_eq!(one["records"][1]["equipment_name"], "Pump-2");

        let (status, missing) = get_json(addr, "/datasets/77").await;
        assert_eq!(status, 404);
        assert_eq!(missing["error"], "dataset 77 not found");
    }

    #[tokio::test]
    async fn test_compare_endpoint() {
        let addr = spawn_app(repository()).await;

        let (status, view) = get_json(addr, "/compare?dataset1=1&dataset2=2").await;
        assert_eq!(status, 200);
        assert_eq!(view["metrics"][0]["percent_change"], "100.00");
        assert_eq!(view["metrics"][1]["percent_change"], "0.00");
        assert_eq!(view["count_diff"], 0);

        let (status, view) = get_json(addr, "/compare?dataset1=3&dataset2=1").await;
        assert_eq!(status, 200);
        assert_eq!(view["first"]["efficiency"], "N/A");
        assert!(view["report"]["first"]["efficiency"].is_null());

        let (status, _) = get_json(addr, "/compare?dataset1=1&dataset2=1").await;
        assert_eq!(status, 400);

        let (status, empty) = get_json(addr, "/compare?dataset1=1&dataset2=4").await;
        assert_eq!(status, 400);
        assert!(empty["error"].as_str().unwrap().contains("empty dataset"));

        let (status, _) = get_json(addr, "/compare?dataset1=1&dataset2=9").await;
        assert_eq!(status, 502);
    }

    #[tokio::test]
    async fn test_workspace_flow() {
        let addr = spawn_app(repository()).await;
        let client = reqwest::Client::new();

        let (_, view) = get_json(addr, "/comparison").await;
        assert_eq!(view["phase"], "empty");

        let response = client
            .put(format!("http://{}/comparison/slots/1", addr))
            .json(&json!({"dataset_id": 1}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 202);

        client
            .put(format!("http://{}/comparison/slots/2", addr))
            .json(&json!({"dataset_id": 2}))
            .send()
            .await
            .unwrap();

        let mut view = Value::Null;
        for _ in 0..50 {
            view = get_json(addr, "/comparison").await.1;
            if view["phase"] == "both_ready" {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(view["phase"], "both_ready");
        assert_eq!(view["comparison"]["metrics"][0]["percent_change"], "100.00");

        let response = client
            .delete(format!("http://{}/comparison/slots/2", addr))
            .send()
            .await
            .unwrap();
        let view: Value = response.json().await.unwrap();
        assert_eq!(view["phase"], "one_ready");
        assert!(view.get("comparison").is_none());

        let response = client
            .put(format!("http://{}/comparison/slots/2", addr))
            .json(&json!({"dataset_id": 1}))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);

        let response = client
            .delete(format!("http://{}/comparison/slots/3", addr))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 400);
    }
}
