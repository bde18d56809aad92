//! Resource layout and transport integration tests

use uif_net::{DirectoryFetcher, MemoryFetcher, ResourceKind, ResourceLayout, ResourcePath, TextFetcher};

// ============================================================================
// Layout configuration
// ============================================================================

#[test]
fn test_layout_from_json_partial() {
    let layout: ResourceLayout = serde_json::from_str(r#"{ "behavior": "mjs" }"#).unwrap();
    assert_eq!(layout.markup, "html");
    assert_eq!(layout.style, "css");
    assert_eq!(layout.behavior, "mjs");
}

#[test]
fn test_all_kinds_in_order() {
    let names: Vec<_> = ResourceKind::ALL.iter().map(|k| k.as_str()).collect();
    assert_eq!(names, vec!["markup", "style", "behavior"]);
}

// ============================================================================
// Transports
// ============================================================================

#[test]
fn test_directory_fetcher_full_definition() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("navbar.html"), "<nav>{title}</nav>").unwrap();
    std::fs::write(dir.path().join("navbar.css"), "nav { color: red }").unwrap();
    let fetcher = DirectoryFetcher::new(dir.path());

    let parts: Vec<Option<String>> = smol::block_on(async {
        let mut out = Vec::new();
        for kind in ResourceKind::ALL {
            out.push(fetcher.fetch(&ResourcePath::new("navbar", kind)).await.unwrap());
        }
        out
    });

    assert_eq!(parts[0].as_deref(), Some("<nav>{title}</nav>"));
    assert_eq!(parts[1].as_deref(), Some("nav { color: red }"));
    assert_eq!(parts[2], None);
}

#[test]
fn test_memory_fetcher_concurrent_overlap() {
    let mut fetcher = MemoryFetcher::new().with_latency(3);
    fetcher.insert("a", ResourceKind::Markup, "A");
    fetcher.insert("b", ResourceKind::Markup, "B");
    let a = ResourcePath::new("a", ResourceKind::Markup);
    let b = ResourcePath::new("b", ResourceKind::Markup);

    let (ra, rb) = smol::block_on(async { futures::join!(fetcher.fetch(&a), fetcher.fetch(&b)) });
    assert_eq!(ra.unwrap().as_deref(), Some("A"));
    assert_eq!(rb.unwrap().as_deref(), Some("B"));
    assert_eq!(fetcher.total_fetches(), 2);
}
