use std::cell::RefCell;
use pincode_lookup::error::LookupError;
use pincode_lookup::postal::LookupService;
use pincode_lookup::postal::model::{decode_reply, Pincode, ServiceReply};
use pincode_lookup::screen::view::NO_MATCH_MESSAGE;
use pincode_lookup::screen::{LookupScreen, Outcome, View};

/// Answers every lookup by decoding a canned response body.
struct CannedService {
    body: &'static str,
    calls: RefCell<Vec<String>>,
}

impl CannedService {
    fn new(body: &'static str) -> Self {
        Self { body, calls: RefCell::new(Vec::new()) }
    }
}

impl LookupService for CannedService {
    async fn lookup(&self, pincode: &Pincode) -> Result<ServiceReply, LookupError> {
        self.calls.borrow_mut().push(pincode.to_string());
        decode_reply(self.body)
    }
}

const A_AND_B: &str = r#"[{"Message":"Number of pincode(s) found:2","Status":"Success","PostOffice":[
    {"Name":"A","BranchType":"Sub Post Office","DeliveryStatus":"Delivery","District":"Central Delhi",
     "Division":"New Delhi Central","Region":"Delhi","State":"Delhi","Country":"India"},
    {"Name":"B","BranchType":"Branch Post Office","DeliveryStatus":"Non-Delivery","District":"Central Delhi",
     "Division":"New Delhi Central","Region":"Delhi","State":"Delhi","Country":"India"}
]}]"#;

fn card_count(screen: &LookupScreen, columns: u16) -> usize {
    let text = screen.view().render(columns);
    text.lines()
        .map(|line| line.matches("Name: ").count())
        .sum()
}

#[tokio::test]
async fn lookup_then_filter_to_one_card() {
    let service = CannedService::new(A_AND_B);
    let mut screen = LookupScreen::new();

    screen.submit_lookup(&service, "110001").await;

    assert_eq!(*service.calls.borrow(), ["110001"]);
    assert!(matches!(screen.outcome(), Outcome::Success { records, .. } if records.len() == 2));
    assert_eq!(card_count(&screen, 80), 2);
    assert_eq!(card_count(&screen, 120), 2);

    let narrowed = screen.update_filter("b");
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].name, "B");
    assert_eq!(card_count(&screen, 80), 1);
    assert!(screen.view().render(80).contains("Branch Type: Branch Post Office"));
}

#[tokio::test]
async fn short_pincode_never_reaches_the_service() {
    let service = CannedService::new(A_AND_B);
    let mut screen = LookupScreen::new();

    screen.submit_lookup(&service, "12345").await;

    assert!(service.calls.borrow().is_empty());
    assert!(matches!(screen.view(), View::Error("Pincode must be exactly 6 digits")));
    assert_eq!(screen.notifications().len(), 2);
}

#[tokio::test]
async fn service_error_message_is_displayed() {
    let service = CannedService::new(r#"[{"Message":"No records found","Status":"Error","PostOffice":null}]"#);
    let mut screen = LookupScreen::new();

    screen.submit_lookup(&service, "999999").await;

    assert_eq!(screen.outcome(), &Outcome::Failure { message: "No records found".into() });
    assert!(screen.view().render(80).contains("No records found"));
}

#[tokio::test]
async fn malformed_and_garbage_bodies_map_to_fixed_messages() {
    let mut screen = LookupScreen::new();

    screen.submit_lookup(&CannedService::new("[]"), "110001").await;
    assert!(matches!(screen.view(), View::Error("Invalid response from server")));

    screen.submit_lookup(&CannedService::new("Service Unavailable"), "110001").await;
    assert!(matches!(screen.view(), View::Error("Failed to fetch data. Please try again.")));
    assert!(!screen.is_loading());
}

#[tokio::test]
async fn unmatched_filter_shows_its_own_message_and_resets_on_next_lookup() {
    let service = CannedService::new(A_AND_B);
    let mut screen = LookupScreen::new();
    screen.submit_lookup(&service, "110001").await;

    assert!(screen.update_filter("Q").is_empty());
    assert!(screen.view().render(80).contains(NO_MATCH_MESSAGE));

    screen.submit_lookup(&service, "110002").await;
    assert_eq!(screen.filter(), "");
    assert_eq!(screen.filtered_records().len(), 2);
    assert_eq!(*service.calls.borrow(), ["110001", "110002"]);
}
