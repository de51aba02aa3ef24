//! Boots the server router on an ephemeral port and drives it through the
//! outer and inner clients.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use netpolicy_client::{InnerClient, OuterClient, RulesApi};
use netpolicy_core::models::{PacketTag, Rule, TaggedGroup};
use netpolicy_server::{app_state::AppState, config, router};

async fn boot(tag_length: usize) -> String {
    let cfg = config::load_from_str(&format!(
        "version: 1\nstore:\n  tag_length: {tag_length}\n"
    ))
    .expect("valid config");
    let state = AppState::new(&cfg).expect("state");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router::build_router(state)).await.unwrap();
    });
    format!("http://{addr}")
}

fn groups(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

fn sorted(mut rules: Vec<Rule>) -> Vec<Rule> {
    rules.sort_by(|a, b| (&a.source, &a.destination).cmp(&(&b.source, &b.destination)));
    rules
}

#[tokio::test]
async fn rule_lifecycle() {
    let base = boot(8).await;
    let outer = OuterClient::new(&base);
    let inner = InnerClient::new(&base);

    // polling before any rule exists
    let wl = inner.get_whitelists(&groups(&["group1", "group2"])).await.unwrap();
    assert_eq!(wl.len(), 2);
    for (w, id) in wl.iter().zip(["group1", "group2"]) {
        assert_eq!(w.destination.id, id);
        assert!(w.destination.tag.is_none());
        assert!(w.allowed_sources.is_empty());
    }
    assert!(outer.list_rules().await.unwrap().is_empty());

    outer.add_rule(&Rule::new("group1", "group2")).await.unwrap();

    let wl = inner
        .get_whitelists(&groups(&["group1", "group2", "group3"]))
        .await
        .unwrap();
    assert_eq!(wl.len(), 3);
    let tag1 = wl[0].destination.tag.clone().expect("group1 tagged");
    assert!(wl[0].allowed_sources.is_empty());
    let tag2 = wl[1].destination.tag.clone().expect("group2 tagged");
    assert_eq!(wl[1].allowed_sources, vec![TaggedGroup::new("group1", Some(tag1.clone()))]);
    assert!(wl[2].destination.tag.is_none());
    assert!(wl[2].allowed_sources.is_empty());
    assert_ne!(tag1, tag2);

    outer.add_rule(&Rule::new("group2", "group3")).await.unwrap();
    let wl = inner.get_whitelists(&groups(&["group3"])).await.unwrap();
    let tag3 = wl[0].destination.tag.clone().expect("group3 tagged");
    assert_eq!(wl[0].allowed_sources, vec![TaggedGroup::new("group2", Some(tag2.clone()))]);
    assert_ne!(tag3, tag2);

    outer.add_rule(&Rule::new("group2", "group2")).await.unwrap();
    let wl = inner.get_whitelists(&groups(&["group2"])).await.unwrap();
    assert_eq!(wl[0].destination.tag, Some(tag2.clone()));
    assert_eq!(
        wl[0].allowed_sources,
        vec![
            TaggedGroup::new("group1", Some(tag1)),
            TaggedGroup::new("group2", Some(tag2)),
        ]
    );

    assert_eq!(
        sorted(outer.list_rules().await.unwrap()),
        sorted(vec![
            Rule::new("group1", "group2"),
            Rule::new("group2", "group3"),
            Rule::new("group2", "group2"),
        ])
    );

    outer.delete_rule(&Rule::new("group2", "group3")).await.unwrap();
    assert_eq!(
        sorted(outer.list_rules().await.unwrap()),
        sorted(vec![Rule::new("group1", "group2"), Rule::new("group2", "group2")])
    );
}

#[tokio::test]
async fn tags_are_sequential_hex_on_the_wire() {
    let base = boot(4).await;
    OuterClient::new(&base)
        .add_rule(&Rule::new("a", "b"))
        .await
        .unwrap();

    let body = reqwest::get(format!("{base}/whitelists?groups=b,nope"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(
        body,
        concat!(
            r#"[{"destination":{"id":"b","tag":"02000000"},"allowed_sources":[{"id":"a","tag":"01000000"}]},"#,
            r#"{"destination":{"id":"nope","tag":null},"allowed_sources":[]}]"#
        )
    );

    let wl = InnerClient::new(&base)
        .get_whitelists(&groups(&["a"]))
        .await
        .unwrap();
    assert_eq!(wl[0].destination.tag, Some(PacketTag::from(vec![1, 0, 0, 0])));
}

#[tokio::test]
async fn delete_of_missing_rule_is_a_500() {
    let base = boot(8).await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/rules/delete"))
        .body(r#"{"group1":"a","group2":"b"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 500);
    assert!(resp.text().await.unwrap().is_empty());

    let err = OuterClient::new(&base)
        .delete_rule(&Rule::new("a", "b"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "delete rule: unexpected status code: 500");
}

#[tokio::test]
async fn invalid_bodies_are_400() {
    let base = boot(8).await;
    let http = reqwest::Client::new();

    for path in ["/rules/add", "/rules/delete"] {
        for body in ["{", r#"{"group1":"a"}"#, r#"{"group1":"","group2":"b"}"#] {
            let resp = http
                .post(format!("{base}{path}"))
                .body(body)
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status().as_u16(), 400, "path={path} body={body}");
        }
    }

    let err = OuterClient::new(&base)
        .add_rule(&Rule::new("", "b"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "add rule: unexpected status code: 400");
}

#[tokio::test]
async fn capacity_exhaustion_is_a_500() {
    // width 1 holds two groups
    let base = boot(1).await;
    let outer = OuterClient::new(&base);

    outer.add_rule(&Rule::new("a", "b")).await.unwrap();
    let err = outer.add_rule(&Rule::new("a", "c")).await.unwrap_err();
    assert_eq!(err.to_string(), "add rule: unexpected status code: 500");
    assert_eq!(outer.list_rules().await.unwrap(), vec![Rule::new("a", "b")]);
}

#[tokio::test]
async fn list_is_json() {
    let base = boot(8).await;
    let resp = reqwest::get(format!("{base}/rules")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    let ct = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(ct.starts_with("application/json"), "content-type={ct}");
    assert_eq!(resp.text().await.unwrap(), "[]");
}

#[tokio::test]
async fn healthz_is_ok() {
    let base = boot(8).await;
    let resp = reqwest::get(format!("{base}/healthz")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = OuterClient::new(format!("http://{addr}"))
        .list_rules()
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("transport: list rules"), "{err}");
}

#[tokio::test]
async fn repeated_groups_param_uses_the_first() {
    let base = boot(4).await;
    OuterClient::new(&base)
        .add_rule(&Rule::new("a", "b"))
        .await
        .unwrap();

    let resp = reqwest::get(format!("{base}/whitelists?groups=b&groups=a"))
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.text().await.unwrap(),
        r#"[{"destination":{"id":"b","tag":"02000000"},"allowed_sources":[{"id":"a","tag":"01000000"}]}]"#
    );

    let resp = reqwest::get(format!("{base}/whitelists")).await.unwrap();
    assert_eq!(resp.status().as_u16(), 200);
    assert_eq!(
        resp.text().await.unwrap(),
        r#"[{"destination":{"id":"","tag":null},"allowed_sources":[]}]"#
    );
}
