use super::*;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};
use shared::domain::Contact;
use tokio::{net::TcpListener, sync::Mutex};
use url::Url;

use crate::{render::Cell, transport::HttpContactApi, view::HtmlView};

#[derive(Default)]
struct FakeAgenda {
    contacts: Mutex<Vec<Contact>>,
    fetch_error: Mutex<Option<ContactError>>,
    add_error: Option<ContactError>,
    fetch_calls: AtomicUsize,
    added: Mutex<Vec<NewContact>>,
}

impl FakeAgenda {
    fn with_contacts(contacts: Vec<Contact>) -> Arc<Self> {
        Arc::new(Self {
            contacts: Mutex::new(contacts),
            ..Self::default()
        })
    }

    fn rejecting_adds(error: ContactError) -> Arc<Self> {
        Arc::new(Self {
            add_error: Some(error),
            ..Self::default()
        })
    }
}

#[async_trait]
impl ContactApi for FakeAgenda {
    async fn fetch_contacts(&self) -> Result<Vec<Contact>, ContactError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.fetch_error.lock().await.clone() {
            return Err(err);
        }
        Ok(self.contacts.lock().await.clone())
    }

    async fn add_contact(&self, contact: &NewContact) -> Result<AddContactAck, ContactError> {
        if let Some(err) = &self.add_error {
            return Err(err.clone());
        }
        self.added.lock().await.push(contact.clone());
        self.contacts.lock().await.push(Contact::new(
            contact.first_name(),
            contact.last_name(),
            contact.phone(),
        ));
        Ok(AddContactAck::Empty)
    }
}

#[derive(Default)]
struct RecordingView {
    pages: Vec<RenderedPage>,
    messages: Vec<String>,
    form_clears: usize,
}

impl RecordingView {
    fn last_page(&self) -> &RenderedPage {
        self.pages.last().expect("at least one render")
    }

    fn last_message(&self) -> &str {
        self.messages.last().map(String::as_str).unwrap_or_default()
    }
}

impl DirectoryView for RecordingView {
    fn show_page(&mut self, page: &RenderedPage) {
        self.pages.push(page.clone());
    }

    fn show_message(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }

    fn clear_form(&mut self) {
        self.form_clears += 1;
    }
}

fn numbered(n: usize) -> Vec<Contact> {
    (0..n)
        .map(|i| Contact::new(format!("Name{i}"), "Test", format!("555-{i:02}")))
        .collect()
}

fn controller(api: Arc<FakeAgenda>) -> ContactListController<RecordingView> {
    ContactListController::new(api, RecordingView::default(), GridShape::default())
}

#[tokio::test]
async fn load_shows_single_card_and_placeholders() {
    let api = FakeAgenda::with_contacts(vec![Contact::new("Ana", "Lopez", "555-1")]);
    let mut controller = controller(api);

    let outcome = controller.load_all().await;

    assert_eq!(outcome, LoadOutcome::Applied { count: 1 });
    let page = controller.view().last_page();
    assert_eq!(page.card_count(), 1);
    assert_eq!(page.placeholder_count(), 14);
    assert_eq!(page.page_label(), "page 1 of 1");
    assert!(!page.show_empty);
    assert_eq!(
        controller.view().messages,
        vec!["Loading contacts...".to_string(), "Loaded 1 contact".to_string()]
    );
}

#[tokio::test]
async fn failed_load_empties_list_and_reports_reason() {
    let api = FakeAgenda::with_contacts(numbered(5));
    let mut controller = controller(api.clone());
    controller.load_all().await;
    assert_eq!(controller.state().contacts().len(), 5);

    *api.fetch_error.lock().await = Some(ContactError::network("connection refused"));
    let outcome = controller.load_all().await;

    assert!(matches!(outcome, LoadOutcome::Failed { .. }));
    assert!(controller.state().contacts().is_empty());
    assert!(controller.view().last_page().show_empty);
    assert_eq!(
        controller.view().last_message(),
        "Could not load contacts: network error: connection refused"
    );
}

#[tokio::test]
async fn paging_through_sixteen_contacts() {
    let mut controller = controller(FakeAgenda::with_contacts(numbered(16)));
    controller.load_all().await;
    assert_eq!(controller.view().last_page().page_label(), "page 1 of 2");

    assert!(controller.go_to_page(1));
    let page = controller.view().last_page();
    assert_eq!(page.page_label(), "page 2 of 2");
    assert_eq!(page.card_count(), 1);
    assert_eq!(page.placeholder_count(), 14);

    let renders = controller.view().pages.len();
    assert!(!controller.go_to_page(1));
    assert_eq!(controller.view().pages.len(), renders, "no-op must not re-render");
    assert_eq!(controller.state().current_page(), 1);

    assert!(controller.go_to_page(-1));
    assert!(!controller.go_to_page(-1));
    assert_eq!(controller.state().current_page(), 0);
}

#[tokio::test]
async fn search_filters_and_returns_to_first_page() {
    let mut contacts = numbered(20);
    contacts.push(Contact::new("Ana", "Lopez", "809-1"));
    let mut controller = controller(FakeAgenda::with_contacts(contacts));
    controller.load_all().await;
    controller.go_to_page(1);

    controller.search("  LOPEZ ");
    assert_eq!(controller.state().current_page(), 0);
    let page = controller.view().last_page();
    assert_eq!(page.card_count(), 1);
    assert!(matches!(&page.cells[0], Cell::Card { first_name, .. } if first_name == "Ana"));

    controller.search("nobody here");
    assert!(controller.view().last_page().show_empty);

    controller.search("");
    assert_eq!(controller.view().last_page().page_label(), "page 1 of 2");
}

#[tokio::test]
async fn incomplete_form_makes_no_request() {
    let api = FakeAgenda::with_contacts(numbered(3));
    let mut controller = controller(api.clone());
    controller.load_all().await;
    let renders = controller.view().pages.len();
    let fetches = api.fetch_calls.load(Ordering::SeqCst);

    let err = controller
        .add_contact("", "Lopez", "555-1")
        .await
        .expect_err("must fail validation");

    assert!(matches!(err, ContactError::Validation(_)));
    assert!(api.added.lock().await.is_empty());
    assert_eq!(api.fetch_calls.load(Ordering::SeqCst), fetches);
    assert_eq!(controller.view().pages.len(), renders);
    assert_eq!(controller.view().form_clears, 0);
    assert_eq!(controller.state().contacts().len(), 3);
    assert!(controller
        .view()
        .last_message()
        .starts_with("Please fill in all fields"));
}

#[tokio::test]
async fn successful_add_reloads_and_shows_last_page() {
    let api = FakeAgenda::with_contacts(numbered(15));
    let mut controller = controller(api.clone());
    controller.load_all().await;
    assert_eq!(controller.state().current_page(), 0);

    controller
        .add_contact(" Ana ", "Lopez", "555-1")
        .await
        .expect("add");

    assert_eq!(api.fetch_calls.load(Ordering::SeqCst), 2);
    assert_eq!(controller.view().form_clears, 1);
    assert_eq!(controller.state().current_page(), 1);
    let page = controller.view().last_page();
    assert_eq!(page.page_label(), "page 2 of 2");
    assert!(matches!(
        &page.cells[0],
        Cell::Card { first_name, last_name, phone }
            if first_name == "Ana" && last_name == "Lopez" && phone == "555-1"
    ));
    assert_eq!(controller.view().last_message(), "Loaded 16 contacts");
}

#[tokio::test]
async fn add_lands_on_last_filtered_page() {
    let api = FakeAgenda::with_contacts(numbered(40));
    let mut controller = controller(api);
    controller.load_all().await;
    controller.search("name1");

    controller
        .add_contact("Name1x", "Extra", "1")
        .await
        .expect("add");

    // Name1, Name10..Name19, Name1x
    assert_eq!(controller.state().filtered_count(), 12);
    assert_eq!(controller.state().current_page(), 0);
    assert_eq!(controller.state().query(), "name1");
}

#[tokio::test]
async fn rejected_add_leaves_state_untouched() {
    let api = FakeAgenda::rejecting_adds(ContactError::HttpStatus {
        status: 400,
        body: "telefono requerido".into(),
    });
    let mut controller = controller(api.clone());
    controller.load_all().await;
    let fetches = api.fetch_calls.load(Ordering::SeqCst);

    let err = controller
        .add_contact("Ana", "Lopez", "555-1")
        .await
        .expect_err("must fail");

    assert!(matches!(err, ContactError::HttpStatus { status: 400, .. }));
    assert_eq!(api.fetch_calls.load(Ordering::SeqCst), fetches);
    assert_eq!(controller.view().form_clears, 0);
    assert_eq!(
        controller.view().last_message(),
        "Could not add contact: unexpected status 400 telefono requerido"
    );
}

#[tokio::test]
async fn render_twice_is_identical() {
    let mut controller = controller(FakeAgenda::with_contacts(numbered(33)));
    controller.load_all().await;
    controller.go_to_page(1);

    let first = controller.render();
    let second = controller.render();
    assert_eq!(first, second);
    assert_eq!(first.to_html(), second.to_html());
}

#[derive(Clone, Default)]
struct AgendaServer {
    contacts: Arc<Mutex<Vec<Value>>>,
    body_override: Option<Value>,
}

async fn list_agenda(State(server): State<AgendaServer>) -> Json<Value> {
    if let Some(body) = &server.body_override {
        return Json(body.clone());
    }
    Json(Value::Array(server.contacts.lock().await.clone()))
}

async fn add_agenda(State(server): State<AgendaServer>, Json(body): Json<Value>) -> Json<Value> {
    server.contacts.lock().await.push(body);
    Json(json!({"ok": true}))
}

async fn spawn_agenda(server: AgendaServer) -> Url {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/agenda.php", get(list_agenda).post(add_agenda))
        .with_state(server);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Url::parse(&format!("http://{addr}/agenda.php")).expect("url")
}

#[tokio::test]
async fn http_non_array_body_shows_empty_state() {
    let endpoint = spawn_agenda(AgendaServer {
        body_override: Some(json!({})),
        ..AgendaServer::default()
    })
    .await;
    let mut controller = ContactListController::new(
        Arc::new(HttpContactApi::new(endpoint)),
        RecordingView::default(),
        GridShape::default(),
    );

    controller.load_all().await;

    let page = controller.view().last_page();
    assert!(page.show_empty);
    assert_eq!(page.page_label(), "page 1 of 1");
    assert_eq!(controller.view().last_message(), "Loaded 0 contacts");
}

#[tokio::test]
async fn http_add_then_reload_moves_to_last_page() {
    let seeded: Vec<Value> = (0..15)
        .map(|i| json!({"nombre": format!("Name{i}"), "apellido": "Test", "telefono": format!("{i}")}))
        .collect();
    let server = AgendaServer {
        contacts: Arc::new(Mutex::new(seeded)),
        body_override: None,
    };
    let endpoint = spawn_agenda(server.clone()).await;
    let mut controller = ContactListController::new(
        Arc::new(HttpContactApi::new(endpoint)),
        RecordingView::default(),
        GridShape::default(),
    );
    controller.load_all().await;

    let ack = controller
        .add_contact("Ana", "Lopez", "555-1")
        .await
        .expect("add");

    assert_eq!(ack, AddContactAck::Json(json!({"ok": true})));
    assert_eq!(server.contacts.lock().await.len(), 16);
    assert_eq!(controller.state().current_page(), 1);
    assert_eq!(controller.view().last_page().card_count(), 1);
}

#[tokio::test]
async fn html_view_keeps_latest_markup_and_message() {
    let api = FakeAgenda::with_contacts(vec![Contact::new("<b>Ana</b>", "Lopez", "555-1")]);
    let mut controller = ContactListController::new(api, HtmlView::new(), GridShape::new(1, 2));

    controller.load_all().await;

    let view = controller.into_view();
    assert_eq!(view.message(), "Loaded 1 contact");
    assert!(view.markup().contains("&lt;b&gt;Ana&lt;/b&gt; Lopez"));
    assert!(view.markup().contains("page 1 of 1"));
    assert_eq!(view.page().map(RenderedPage::card_count), Some(1));
}
