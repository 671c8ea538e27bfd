mod common;

use common::{FakePage, FakeSite, BASE, CONTROLS};
use roster_browser::{BrowserActions, BrowserLauncher, ElementSnapshot};
use roster_core::ScanningConfig;
use roster_scanner::PageController;
use std::time::Duration;

fn control(text: &str) -> ElementSnapshot {
    ElementSnapshot {
        text: text.to_string(),
        href: None,
        visible: true,
    }
}

async fn dismiss_on(page: FakePage) -> (usize, Vec<String>) {
    let site = FakeSite::new().page(BASE, page);
    let log = site.log();
    let tab = site.launch().await.unwrap();
    tab.navigate(BASE, Duration::from_secs(5)).await.unwrap();

    let scanning = ScanningConfig::immediate();
    let controller = PageController::new(&tab, Duration::from_secs(5), &scanning);
    let clicked = controller.dismiss_interstitials().await;

    let labels = log.lock().unwrap().clicked_labels.clone();
    (clicked, labels)
}

#[tokio::test]
async fn test_controls_requeried_after_click() {
    let page = FakePage::titled("Athletics")
        .with_elements(
            CONTROLS,
            vec![control("Close banner"), control("Close"), control("Buy Tickets")],
        )
        .removed_on_click("Close banner");

    let (clicked, labels) = dismiss_on(page).await;

    assert_eq!(labels, vec!["Close banner", "Close"]);
    assert_eq!(clicked, 2);
}

#[tokio::test]
async fn test_static_controls_each_clicked_once() {
    let page = FakePage::titled("Athletics")
        .with_elements(CONTROLS, vec![control("Accept"), control("Accept")]);

    let (clicked, labels) = dismiss_on(page).await;

    assert_eq!(labels, vec!["Accept", "Accept"]);
    assert_eq!(clicked, 2);
}

#[tokio::test]
async fn test_failed_scan_moves_on_to_next_word() {
    let page = FakePage::titled("Athletics")
        .with_elements(CONTROLS, vec![control("Accept cookies"), control("Close")])
        .with_flaky_selector(CONTROLS, 1);

    let (clicked, labels) = dismiss_on(page).await;

    // The "accept" scan hit the failing query; later words still ran.
    assert_eq!(labels, vec!["Close"]);
    assert_eq!(clicked, 1);
}

#[tokio::test]
async fn test_lazy_load_scrolls_current_page() {
    let site = FakeSite::new().page(BASE, FakePage::titled("Athletics"));
    let log = site.log();
    let tab = site.launch().await.unwrap();
    tab.navigate(BASE, Duration::from_secs(5)).await.unwrap();

    let scanning = ScanningConfig::immediate();
    PageController::new(&tab, Duration::from_secs(5), &scanning)
        .trigger_lazy_load()
        .await;

    assert_eq!(log.lock().unwrap().scrolls, vec![BASE.to_string()]);
}

#[tokio::test]
async fn test_not_found_from_title_or_body() {
    let site = FakeSite::new()
        .page(BASE, FakePage::titled("Athletics"))
        .page(
            "https://example.edu/soft-404",
            FakePage {
                title: "Bearcats".to_string(),
                body: "Sorry, that page was not found.".to_string(),
                ..FakePage::default()
            },
        );
    let tab = site.launch().await.unwrap();
    let scanning = ScanningConfig::immediate();
    let controller = PageController::new(&tab, Duration::from_secs(5), &scanning);

    controller.navigate(BASE).await.unwrap();
    assert!(!controller.is_not_found().await);

    controller.navigate("https://example.edu/soft-404").await.unwrap();
    assert!(controller.is_not_found().await);

    controller.navigate("https://example.edu/missing").await.unwrap();
    assert!(controller.is_not_found().await);
}
