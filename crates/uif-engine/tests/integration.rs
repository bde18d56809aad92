//! Integration tests for uif Engine
//!
//! Whole page sessions: directory and in-memory component sources, host
//! events routed to controllers, and input changes routed to validation.

use std::fs;
use std::rc::Rc;

use uif_engine::component::{
    BehaviorModule, Check, Controller, ControllerError, Invocation, Member, Value, attrs,
};
use uif_engine::dom::NodeId;
use uif_engine::net::{MemoryFetcher, ResourceKind};
use uif_engine::{Config, Engine, EngineError};

fn component_dir(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, text) in files {
        fs::write(dir.path().join(name), text).unwrap();
    }
    dir
}

fn directory_engine(dir: &tempfile::TempDir) -> Engine {
    Engine::new(Config {
        component_root: dir.path().to_path_buf(),
        ..Config::default()
    })
}

fn first(page: &uif_engine::Page, tag: &str) -> NodeId {
    page.document().borrow().first_by_tag(tag).unwrap()
}

fn attr(page: &uif_engine::Page, node: NodeId, name: &str) -> Option<String> {
    page.document().borrow().tree.get_attribute(node, name).map(str::to_string)
}

// ============================================================================
// Directory-backed pages
// ============================================================================

#[test]
fn test_json_behavior_from_directory() {
    let dir = component_dir(&[
        ("site-header.html", "<h1>{title}</h1><p>{missing}</p>"),
        ("site-header.css", "h1 { color: teal }"),
        ("site-header.js", r#"{ "title": "Welcome" }"#),
    ]);
    let engine = directory_engine(&dir);
    let page = engine.open("<html><head></head><body><site-header></site-header></body></html>").unwrap();

    let found = smol::block_on(page.load());
    assert_eq!(found.len(), 1);
    assert!(found[0].has_controller());
    assert_eq!(
        page.body_html(),
        r#"<site-header uif-component="site-header"><h1>Welcome</h1><p>{missing}</p></site-header>"#
    );

    let html = page.to_html(false);
    assert!(html.contains(r#"uif-style="site-header""#), "{html}");
    assert!(html.contains("h1 { color: teal }"));
}

#[test]
fn test_markup_only_component_and_missing_tag() {
    let dir = component_dir(&[("plain-note.html", "<em>note</em>")]);
    let engine = directory_engine(&dir);
    let page = engine
        .open("<body><div><plain-note></plain-note></div><ghost-tag><b>kept</b></ghost-tag></body>")
        .unwrap();

    let found = smol::block_on(page.load());
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|instance| !instance.has_controller()));
    assert_eq!(
        page.body_html(),
        r#"<div><plain-note uif-component="plain-note"><em>note</em></plain-note></div><ghost-tag uif-component="ghost-tag"><b>kept</b></ghost-tag>"#
    );
}

#[test]
fn test_prior_content_slot_from_directory() {
    let dir = component_dir(&[("fancy-box.html", "<div class=\"frame\"><innerhtml></div>")]);
    let engine = directory_engine(&dir);
    let page = engine.open("<body><fancy-box><i>inside</i></fancy-box></body>").unwrap();

    smol::block_on(page.load());
    assert_eq!(
        page.body_html(),
        r#"<fancy-box uif-component="fancy-box"><div class="frame"><i>inside</i></div></fancy-box>"#
    );
}

#[test]
fn test_open_missing_file() {
    let engine = Engine::default();
    let result = smol::block_on(engine.open_file(std::path::Path::new("/no/such/page.html")));
    assert!(matches!(result, Err(EngineError::Io { .. })));
}

#[test]
fn test_open_file_reads_page() {
    let dir = component_dir(&[("page.html", "<body><p>static</p></body>")]);
    let engine = directory_engine(&dir);
    let page = smol::block_on(engine.open_file(&dir.path().join("page.html"))).unwrap();

    assert!(smol::block_on(page.load()).is_empty());
    assert_eq!(page.body_html(), "<p>static</p>");
}

// ============================================================================
// Events
// ============================================================================

/// Counter bound to clicks; `add` takes a step argument
struct Counter {
    count: i64,
}

impl Controller for Counter {
    fn members(&self) -> Vec<Member> {
        vec![Member::property("count"), Member::method("onClickIncrement"), Member::method("add")]
    }

    fn property(&self, key: &str) -> Option<Value> {
        (key == "count").then(|| Value::from(self.count))
    }

    fn invoke(&mut self, key: &str, call: Invocation) -> Result<Value, ControllerError> {
        match key {
            "onClickIncrement" => {
                let event = call.event.ok_or_else(|| ControllerError::Failed("no event".to_string()))?;
                assert_eq!(event.event_type, "click");
                self.count += 1;
                Ok(Value::from(self.count))
            }
            "add" => {
                self.count += call.arg(0).as_i64().unwrap_or(0);
                Ok(Value::from(self.count))
            }
            _ => Err(ControllerError::UnknownMember(key.to_string())),
        }
    }
}

fn counter_engine(markup: &str, rerender: bool) -> Engine {
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("click-counter", ResourceKind::Markup, markup);
    let mut engine = Engine::new(Config {
        rerender_on_dispatch: rerender,
        ..Config::default()
    })
    .with_fetcher(Rc::new(fetcher));
    engine.register("click-counter", BehaviorModule::new().default_export(|_| Ok(Counter { count: 0 })));
    engine
}

#[test]
fn test_fire_click_rerenders() {
    let engine = counter_engine("<button onClickIncrement><span>{count}</span></button>", true);
    let page = engine.open("<body><click-counter></click-counter></body>").unwrap();
    smol::block_on(page.load());
    assert!(page.body_html().contains("<span>0</span>"));

    // fired at the inner span, handled by the button's binding
    let span = first(&page, "span");
    let value = smol::block_on(page.fire(span, "click")).unwrap();
    assert_eq!(value, Some(Value::from(1)));
    assert!(page.body_html().contains("<span>1</span>"), "{}", page.body_html());

    let span = first(&page, "span");
    smol::block_on(page.fire(span, "click")).unwrap();
    assert!(page.body_html().contains("<span>2</span>"));
}

#[test]
fn test_fire_without_binding() {
    let engine = counter_engine("<p>{count}</p>", false);
    let page = engine.open("<body><click-counter></click-counter></body>").unwrap();
    smol::block_on(page.load());

    let p = first(&page, "p");
    assert_eq!(smol::block_on(page.fire(p, "click")).unwrap(), None);
}

#[test]
fn test_fire_outside_components_has_no_owner() {
    let engine = counter_engine("<p>{count}</p>", false);
    let page = engine
        .open(r#"<body><button onclick='uif.dispatch(this, event, "add", 2)'>x</button></body>"#)
        .unwrap();
    smol::block_on(page.load());

    let button = first(&page, "button");
    let result = smol::block_on(page.fire(button, "click"));
    assert!(matches!(result, Err(EngineError::Component(_))));
}

#[test]
fn test_fire_prior_content_binding_with_args() {
    let engine = counter_engine("<div><innerhtml></div>", false);
    let page = engine
        .open(r#"<body><click-counter><a onclick='uif.dispatch(this, event, "add", 5)'>+5</a></click-counter></body>"#)
        .unwrap();
    smol::block_on(page.load());

    let a = first(&page, "a");
    assert_eq!(smol::block_on(page.fire(a, "click")).unwrap(), Some(Value::from(5)));
    assert_eq!(smol::block_on(page.fire(a, "CLICK")).unwrap(), Some(Value::from(10)));
}

// ============================================================================
// Validation
// ============================================================================

/// Sign-up form with a length check
struct SignUp;

impl Controller for SignUp {
    fn members(&self) -> Vec<Member> {
        vec![Member::method("mustBeLong")]
    }

    fn property(&self, _key: &str) -> Option<Value> {
        None
    }

    fn invoke(&mut self, key: &str, _call: Invocation) -> Result<Value, ControllerError> {
        Err(ControllerError::UnknownMember(key.to_string()))
    }

    fn validator(&self, name: &str, value: &str, _form: Option<NodeId>) -> Option<Check> {
        (name == "mustBeLong").then(|| {
            let verdict = if value.len() >= 4 { String::new() } else { "Too short".to_string() };
            Check::ready(verdict)
        })
    }
}

#[test]
fn test_change_runs_component_validator() {
    let mut fetcher = MemoryFetcher::new();
    fetcher.insert("sign-up", ResourceKind::Markup, "<form><label mustBeLong><input name=\"user\"></label></form>");
    let mut engine = Engine::default().with_fetcher(Rc::new(fetcher));
    engine.register("sign-up", BehaviorModule::new().export("SignUp", |_| Ok(SignUp)));

    let page = engine.open("<body><sign-up></sign-up></body>").unwrap();
    smol::block_on(page.load());
    let (label, input) = (first(&page, "label"), first(&page, "input"));
    assert!(attr(&page, label, "uif-check-must-be-long").is_some());

    smol::block_on(page.change(input, "ab")).unwrap();
    assert_eq!(attr(&page, input, "value").as_deref(), Some("ab"));
    assert_eq!(attr(&page, label, "uif-fail-must-be-long").as_deref(), Some("Too short"));
    assert_eq!(attr(&page, label, attrs::STATE).as_deref(), Some("bad"));

    smol::block_on(page.change(input, "abcd")).unwrap();
    assert_eq!(attr(&page, label, "uif-fail-must-be-long"), None);
    assert_eq!(attr(&page, label, attrs::STATE).as_deref(), Some("good"));
}

#[test]
fn test_change_required_input_without_components() {
    let engine = Engine::default().with_fetcher(Rc::new(MemoryFetcher::new()));
    let page = engine.open("<body><input required></body>").unwrap();
    smol::block_on(page.load());
    let input = first(&page, "input");

    smol::block_on(page.change(input, "")).unwrap();
    assert_eq!(attr(&page, input, "uif-fail-must-be").as_deref(), Some("Required"));
    assert_eq!(attr(&page, input, attrs::STATE).as_deref(), Some("bad"));

    smol::block_on(page.change(input, "filled")).unwrap();
    assert_eq!(attr(&page, input, attrs::STATE).as_deref(), Some("good"));
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_config_layout_selects_extensions() {
    let dir = component_dir(&[
        ("info-card.htm", "<b>{name}</b>"),
        ("info-card.json", r#"{ "name": "Ada" }"#),
    ]);
    let config = Config::from_json(&format!(
        r#"{{ "component_root": {:?}, "layout": {{ "markup": "htm", "behavior": "json" }} }}"#,
        dir.path().display().to_string()
    ))
    .unwrap();
    let page = Engine::new(config).open("<body><info-card></info-card></body>").unwrap();

    smol::block_on(page.load());
    assert!(page.body_html().contains("<b>Ada</b>"));
}

#[test]
fn test_bad_component_url() {
    let engine = Engine::new(Config {
        component_url: Some("not a url".to_string()),
        ..Config::default()
    });
    assert!(matches!(engine.open("<body></body>"), Err(EngineError::Network(_))));
}
