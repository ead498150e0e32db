use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rymd_utils::{
    ALL, Arg, AsyncHandler, Emitter, EmitterConfig, Evented, HandlerError, Reply, args,
};
use tokio::sync::mpsc;

type Log = Arc<Mutex<Vec<(String, Vec<Arg>)>>>;

/// Records `(tag, args)` for every call of `event` on `e`.
fn record(e: &Emitter, event: &str, tag: &str, log: &Log) {
    let log = Arc::clone(log);
    let tag = tag.to_owned();
    e.subscribe(event, move |_ctx, args| {
        log.lock().unwrap().push((tag.clone(), args.to_vec()));
        Ok(Reply::Done)
    });
}

/// Forwards the arguments of `event` on `e` into a channel.
fn channel(e: &Emitter, event: &str) -> mpsc::UnboundedReceiver<Vec<Arg>> {
    let (tx, rx) = mpsc::unbounded_channel();
    e.subscribe(event, move |_ctx, args| {
        let _ = tx.send(args.to_vec());
        Ok(Reply::Done)
    });
    rx
}

#[test]
fn handlers_run_in_registration_order_with_identical_args() {
    let e = Emitter::new();
    let log: Log = Arc::default();
    for tag in ["first", "second", "third"] {
        record(&e, "event", tag, &log);
    }

    e.publish("event", args!["Test", 7]);

    let log = log.lock().unwrap();
    let tags: Vec<&str> = log.iter().map(|(t, _)| t.as_str()).collect();
    assert_eq!(tags, ["first", "second", "third"]);
    for (_, args) in log.iter() {
        assert_eq!(*args, args!["Test", 7]);
    }
}

#[test]
fn all_subscribers_run_after_exact_ones_with_event_name_prepended() {
    let e = Emitter::new();
    let log: Log = Arc::default();
    record(&e, ALL, "all", &log);
    record(&e, "event", "exact", &log);

    e.publish("event", args!["Test"]);
    e.publish("other", args![]);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 3);
    assert_eq!(log[0], ("exact".to_string(), args!["Test"]));
    assert_eq!(log[1], ("all".to_string(), args!["event", "Test"]));
    assert_eq!(log[2], ("all".to_string(), args!["other"]));
}

#[test]
fn separate_emitters_do_not_share_handlers() {
    let a = Emitter::new();
    let b = Emitter::new();
    let log: Log = Arc::default();
    record(&a, "event", "a", &log);
    record(&b, "event", "b", &log);

    a.publish("event", args!["Test"]);
    assert_eq!(log.lock().unwrap().len(), 1);
}

#[test]
fn failing_handler_publishes_error_same_tick_and_publish_survives() {
    let e = Emitter::new();
    let log: Log = Arc::default();
    record(&e, "eventError", "error", &log);
    e.subscribe("event", |_ctx, _args| Err(HandlerError::fail("boom")));
    record(&e, "event", "after", &log);

    e.publish("event", args!["x"]);

    let log = log.lock().unwrap();
    assert_eq!(
        log[0],
        ("error".to_string(), vec![Arg::Error(HandlerError::fail("boom"))])
    );
    // The remaining handler still ran.
    assert_eq!(log[1], ("after".to_string(), args!["x"]));
}

#[test]
fn unhandled_failures_are_dropped_silently() {
    let e = Emitter::new();
    e.subscribe("event", |_ctx, _args| Err(HandlerError::fail("nobody listens")));
    e.publish("event", args![]);
    assert_eq!(e.listener_count("eventError"), 0);
}

#[test]
fn failing_error_handler_widens_to_error_error() {
    let e = Emitter::new();
    let log: Log = Arc::default();
    e.subscribe("eventError", |_ctx, _args| Err(HandlerError::fail("second")));
    record(&e, "eventErrorError", "deep", &log);
    e.subscribe("event", |_ctx, _args| Err(HandlerError::fail("first")));

    e.publish("event", args![]);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].1, vec![Arg::Error(HandlerError::fail("second"))]);
}

#[test]
fn always_failing_all_handler_terminates_at_depth_cap() {
    let e = Emitter::with_config(EmitterConfig {
        max_error_depth: 4,
        ..EmitterConfig::default()
    });
    let calls = Arc::new(Mutex::new(0usize));
    let counter = Arc::clone(&calls);
    e.subscribe(ALL, move |_ctx, _args| {
        *counter.lock().unwrap() += 1;
        Err(HandlerError::fail("always"))
    });

    e.publish("event", args![]);
    // event, eventError, ..., event + 4 × "Error"
    assert_eq!(*calls.lock().unwrap(), 5);
}

#[tokio::test]
async fn rejected_deferred_reply_publishes_error_after_settling() {
    let e = Emitter::new();
    let mut errors = channel(&e, "eventError");
    let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
    let release_rx = Arc::new(Mutex::new(Some(release_rx)));

    e.subscribe("event", move |_ctx, _args| {
        let gate = release_rx.lock().unwrap().take();
        Ok(Reply::deferred(async move {
            if let Some(gate) = gate {
                let _ = gate.await;
            }
            Err(HandlerError::fail("rejected later"))
        }))
    });

    e.publish("event", args![]);
    // Not yet settled.
    assert!(errors.try_recv().is_err());

    release_tx.send(()).unwrap();
    let got = tokio::time::timeout(Duration::from_secs(1), errors.recv())
        .await
        .expect("error event")
        .unwrap();
    assert_eq!(got, vec![Arg::Error(HandlerError::fail("rejected later"))]);
}

#[tokio::test]
async fn fulfilled_deferred_reply_publishes_nothing() {
    let e = Emitter::new();
    let mut errors = channel(&e, "eventError");
    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();
    let done_tx = Arc::new(Mutex::new(Some(done_tx)));

    e.subscribe("event", move |_ctx, _args| {
        let done = done_tx.lock().unwrap().take();
        Ok(Reply::deferred(async move {
            if let Some(done) = done {
                let _ = done.send(());
            }
            Ok(())
        }))
    });

    e.publish("event", args![]);
    done_rx.await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(errors.try_recv().is_err());
}

async fn explode() -> Result<(), HandlerError> {
    panic!("deferred kaboom")
}

#[tokio::test]
async fn panicking_deferred_reply_is_reported() {
    let e = Emitter::new();
    let mut errors = channel(&e, "eventError");
    e.subscribe("event", |_ctx, _args| Ok(Reply::deferred(explode())));

    e.publish("event", args![]);
    let got = tokio::time::timeout(Duration::from_secs(1), errors.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        got,
        vec![Arg::Error(HandlerError::Panicked {
            info: "deferred kaboom".into()
        })]
    );
}

struct Upload;

#[async_trait]
impl AsyncHandler for Upload {
    async fn call(&self, _ctx: Emitter, args: Vec<Arg>) -> Result<(), HandlerError> {
        tokio::task::yield_now().await;
        match args.first().and_then(Arg::as_str) {
            Some("ok") => Ok(()),
            _ => Err(HandlerError::fail("upload refused")),
        }
    }

    fn name(&self) -> &'static str {
        "upload"
    }
}

#[tokio::test]
async fn async_handler_failure_reaches_explicit_context() {
    let source = Emitter::named("source");
    let ctx = Emitter::named("ctx");
    let mut errors = channel(&ctx, "uploadError");
    source.subscribe_async("upload", Arc::new(Upload), Some(&ctx));

    source.publish("upload", args!["ok"]);
    source.publish("upload", args!["nope"]);

    let got = tokio::time::timeout(Duration::from_secs(1), errors.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(got, vec![Arg::Error(HandlerError::fail("upload refused"))]);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(errors.try_recv().is_err());
}

#[test]
fn deferred_reply_runs_on_configured_runtime() {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .unwrap();
    let e = Emitter::with_config(EmitterConfig {
        runtime: Some(runtime.handle().clone()),
        ..EmitterConfig::default()
    });
    let mut errors = channel(&e, "eventError");
    e.subscribe("event", |_ctx, _args| {
        Ok(Reply::deferred(async { Err(HandlerError::fail("off-runtime")) }))
    });

    // Published from a plain thread, outside any runtime.
    e.publish("event", args![]);

    let got = runtime.block_on(async {
        tokio::time::timeout(Duration::from_secs(1), errors.recv())
            .await
            .unwrap()
            .unwrap()
    });
    assert_eq!(got, vec![Arg::Error(HandlerError::fail("off-runtime"))]);
}

#[test]
fn bubble_republishes_with_source_last() {
    let x = Emitter::named("x");
    let source = Emitter::named("source");
    x.bubble("eventA", &source);

    let log: Log = Arc::default();
    record(&x, "eventA", "exact", &log);
    record(&x, ALL, "all", &log);

    source.publish("eventA", args!["v"]);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0], ("exact".to_string(), args!["v", &source]));
    assert_eq!(log[1], ("all".to_string(), args!["eventA", "v", &source]));
    assert!(log[1].1.last().unwrap().as_source().unwrap().ptr_eq(&source));
}

#[test]
fn bubble_with_transform_appends_value_before_source() {
    let x = Emitter::named("x");
    let source = Emitter::new();
    x.bubble_with("eventA", &source, |ctx| Arg::from(ctx.label().unwrap_or_default()));

    let log: Log = Arc::default();
    record(&x, "eventA", "exact", &log);
    source.publish("eventA", args![1, 2]);

    assert_eq!(
        log.lock().unwrap()[0].1,
        args![1, 2, "x", &source]
    );
}

#[test]
fn bubble_relays_source_handler_failures() {
    let x = Emitter::new();
    let source = Emitter::new();
    x.bubble("eventA", &source);
    source.subscribe("eventA", |_ctx, _args| Err(HandlerError::fail("source broke")));

    let log: Log = Arc::default();
    record(&x, "eventAError", "error", &log);
    source.publish("eventA", args!["v"]);

    let log = log.lock().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].1, vec![Arg::Error(HandlerError::fail("source broke"))]);
}

#[test]
fn bubbling_chains_through_several_levels() {
    let leaf = Emitter::named("leaf");
    let middle = Emitter::named("middle");
    let root = Emitter::named("root");
    middle.bubble("saved", &leaf);
    root.bubble("saved", &middle);

    let log: Log = Arc::default();
    record(&root, "saved", "root", &log);
    leaf.publish("saved", args!["v"]);

    assert_eq!(log.lock().unwrap()[0].1, args!["v", &leaf, &middle]);
}

#[test]
fn failing_bubbled_listener_reports_on_bubbling_object() {
    let x = Emitter::new();
    let source = Emitter::new();
    x.bubble("eventA", &source);
    x.subscribe("eventA", |_ctx, _args| Err(HandlerError::fail("listener broke")));

    let on_x: Log = Arc::default();
    let on_source: Log = Arc::default();
    record(&x, "eventAError", "x", &on_x);
    record(&source, "eventAError", "source", &on_source);

    source.publish("eventA", args![]);

    assert_eq!(on_x.lock().unwrap().len(), 1);
    assert!(on_source.lock().unwrap().is_empty());
}

struct Album {
    events: Emitter,
}

impl Evented for Album {
    fn emitter(&self) -> &Emitter {
        &self.events
    }
}

#[test]
fn evented_types_chain_like_the_emitter() {
    let album = Album {
        events: Emitter::named("album"),
    };
    let photo = Album {
        events: Emitter::named("photo"),
    };
    let log: Log = Arc::default();
    let sink = Arc::clone(&log);

    album
        .bubble("saved", &photo)
        .subscribe("saved", move |ctx, args| {
            assert_eq!(ctx.label(), Some("album"));
            sink.lock().unwrap().push(("album".into(), args.to_vec()));
            Ok(Reply::Done)
        });
    photo.publish("saved", args!["v"]);

    assert_eq!(log.lock().unwrap()[0].1, args!["v", photo.emitter()]);
}
