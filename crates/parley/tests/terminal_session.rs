use parley::SessionBuilder;
use parley::config::endpoint_config_from;
use parley::model::ErrorKind;
use parley::render::TranscriptPrinter;
use parley_http_endpoint::HttpEndpoint;
use parley_test_endpoint::{PresetOutcome, TestEndpoint};
use tokio::net::TcpListener;

#[tokio::test(start_paused = true)]
async fn test_printer_only_prints_new_messages() {
    let endpoint = TestEndpoint::with_outcomes([
        PresetOutcome::reply("Hi there"),
        PresetOutcome::status(500),
    ]);
    let session = SessionBuilder::with_endpoint(endpoint).build();
    let mut printer = TranscriptPrinter::default();

    let lines = printer.take_new_lines(&session.view());
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("How can I assist you today?"));

    session.submit("Hello").unwrap();
    let view = session.wait_idle().await.unwrap();
    let lines = printer.take_new_lines(&view);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("Hello"));
    assert!(lines[1].contains("Hi there"));

    assert!(printer.take_new_lines(&view).is_empty());

    session.submit("again").unwrap();
    let view = session.wait_idle().await.unwrap();
    let lines = printer.take_new_lines(&view);
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("Error"));
    assert!(lines[1].contains("offline"));
}

#[tokio::test]
async fn test_unreachable_endpoint_shows_network_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let url = format!("http://{addr}/chat");
    let config = endpoint_config_from(|var| {
        (var == "PARLEY_ENDPOINT_URL").then(|| url.clone())
    })
    .unwrap();
    let endpoint = HttpEndpoint::new(config).unwrap();
    let session = SessionBuilder::with_endpoint(endpoint).build();

    session.submit("test").unwrap();
    let view = session.wait_idle().await.unwrap();

    assert!(!view.is_pending());
    assert_eq!(view.messages().len(), 3);
    let last = view.last_message().unwrap();
    assert_eq!(last.error_kind(), Some(ErrorKind::Network));
    assert!(last.text().contains("internet connection"));
}
