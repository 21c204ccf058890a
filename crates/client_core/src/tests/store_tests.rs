use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

use super::*;

async fn spawn_patient_server(app: Router) -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn alice(id: i64) -> Patient {
    Patient {
        id: PatientId(id),
        name: "Alice".to_string(),
        age: "30".to_string(),
        gender: "F".to_string(),
        address: "1 Main St".to_string(),
    }
}

#[derive(Clone)]
struct CaptureState<T: Send + 'static> {
    tx: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T: Send + 'static> CaptureState<T> {
    fn channel() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                tx: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    async fn capture(&self, value: T) {
        if let Some(tx) = self.tx.lock().await.take() {
            let _ = tx.send(value);
        }
    }
}

#[tokio::test]
async fn list_fetches_patients_from_the_collection_endpoint() {
    async fn handle_list() -> Json<Vec<Patient>> {
        Json(vec![alice(1), alice(2)])
    }

    let app = Router::new().route("/patients", get(handle_list));
    let server_url = spawn_patient_server(app).await;
    let store = RestPatientStore::new(server_url);

    let patients = store.list().await.expect("list");
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0], alice(1));
}

#[tokio::test]
async fn create_posts_the_draft_and_returns_the_server_assigned_record() {
    async fn handle_create(
        State(state): State<CaptureState<NewPatient>>,
        Json(body): Json<NewPatient>,
    ) -> Json<Patient> {
        state.capture(body.clone()).await;
        Json(Patient {
            id: PatientId(7),
            name: body.name,
            age: body.age,
            gender: body.gender,
            address: body.address,
        })
    }

    let (state, body_rx) = CaptureState::channel();
    let app = Router::new()
        .route("/patients", post(handle_create))
        .with_state(state);
    let server_url = spawn_patient_server(app).await;
    let store = RestPatientStore::new(server_url);

    let draft = NewPatient {
        name: "Alice".to_string(),
        age: "30".to_string(),
        gender: "F".to_string(),
        address: "1 Main St".to_string(),
    };
    let created = store.create(&draft).await.expect("create");

    assert_eq!(created.id, PatientId(7));
    assert_eq!(created.name, "Alice");
    assert_eq!(body_rx.await.expect("captured body"), draft);
}

#[tokio::test]
async fn update_puts_the_draft_to_the_patient_path() {
    async fn handle_update(
        State(state): State<CaptureState<i64>>,
        Path(id): Path<i64>,
        Json(body): Json<NewPatient>,
    ) -> Json<Patient> {
        state.capture(id).await;
        Json(Patient {
            id: PatientId(id),
            name: body.name,
            age: body.age,
            gender: body.gender,
            address: body.address,
        })
    }

    let (state, id_rx) = CaptureState::channel();
    let app = Router::new()
        .route("/patients/:id", put(handle_update))
        .with_state(state);
    let server_url = spawn_patient_server(app).await;
    let store = RestPatientStore::new(server_url);

    let mut draft = NewPatient::from(&alice(5));
    draft.age = "31".to_string();
    let updated = store.update(PatientId(5), &draft).await.expect("update");

    assert_eq!(id_rx.await.expect("captured id"), 5);
    assert_eq!(updated.id, PatientId(5));
    assert_eq!(updated.age, "31");
}

#[tokio::test]
async fn delete_targets_the_patient_path_and_ignores_the_response_body() {
    async fn handle_delete(
        State(state): State<CaptureState<i64>>,
        Path(id): Path<i64>,
    ) -> (StatusCode, &'static str) {
        state.capture(id).await;
        // Body deliberately non-empty and non-JSON; the client must not
        // try to parse it.
        (StatusCode::OK, "removed")
    }

    let (state, id_rx) = CaptureState::channel();
    let app = Router::new()
        .route("/patients/:id", delete(handle_delete))
        .with_state(state);
    let server_url = spawn_patient_server(app).await;
    let store = RestPatientStore::new(server_url);

    store.delete(PatientId(3)).await.expect("delete");
    assert_eq!(id_rx.await.expect("captured id"), 3);
}

#[tokio::test]
async fn non_success_status_surfaces_as_remote_call_failed() {
    async fn handle_list() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    let app = Router::new().route("/patients", get(handle_list));
    let server_url = spawn_patient_server(app).await;
    let store = RestPatientStore::new(server_url);

    let err = store.list().await.expect_err("must fail");
    assert_eq!(err.operation, StoreOperation::List);
    assert!(err.message.contains("500"), "unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_server_surfaces_as_remote_call_failed() {
    // Nothing listens on the reserved port 1.
    let store = RestPatientStore::new("http://127.0.0.1:1");

    let err = store.list().await.expect_err("must fail");
    assert_eq!(err.operation, StoreOperation::List);
}

#[tokio::test]
async fn execute_echoes_the_deleted_id_from_the_request() {
    async fn handle_delete(Path(_id): Path<i64>) -> StatusCode {
        StatusCode::NO_CONTENT
    }

    let app = Router::new().route("/patients/:id", delete(handle_delete));
    let server_url = spawn_patient_server(app).await;
    let store = RestPatientStore::new(server_url);

    let update = execute(&store, StoreRequest::Delete(PatientId(9)))
        .await
        .expect("delete");
    assert_eq!(update, StoreUpdate::Deleted(PatientId(9)));
}
