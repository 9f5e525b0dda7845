use pagewire_core::event_bus::catalog::{Ply, SocketInFen, Theme, Zen};
use pagewire_core::{EventBus, Handler, OneTimeEvent, OneTimeState};
use parking_lot::Mutex;
use proptest::prelude::*;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

fn counter() -> (Arc<AtomicUsize>, Handler<Zen>) {
    let count = Arc::new(AtomicUsize::new(0));
    let c = count.clone();
    let handler = Handler::<Zen>::new(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    (count, handler)
}

#[test]
fn test_registered_handler_invoked_once_with_args() {
    let bus = EventBus::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let s = seen.clone();
    bus.subscribe::<Theme, _>(move |theme| s.lock().push(theme.clone()));

    bus.emit::<Theme>("dark".to_string()).unwrap();
    assert_eq!(*seen.lock(), vec!["dark".to_string()]);
}

#[test]
fn test_off_stops_delivery() {
    let bus = EventBus::new();
    let (count, handler) = counter();
    bus.on(&handler);
    bus.emit::<Zen>(()).unwrap();
    bus.off(&handler);
    bus.emit::<Zen>(()).unwrap();
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_double_registration_invokes_once() {
    let bus = EventBus::new();
    let (count, handler) = counter();
    bus.on(&handler);
    bus.on(&handler.clone());
    assert_eq!(bus.emit::<Zen>(()).unwrap(), 1);
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn test_ply_reaches_both_handlers_before_emit_returns() {
    let bus = EventBus::new();
    let calls = Arc::new(Mutex::new(Vec::new()));

    let c1 = calls.clone();
    bus.subscribe::<Ply, _>(move |args| c1.lock().push(("h1", *args)));
    let c2 = calls.clone();
    bus.subscribe::<Ply, _>(move |args| c2.lock().push(("h2", *args)));

    assert_eq!(bus.emit::<Ply>((7, Some(true))).unwrap(), 2);
    assert_eq!(
        *calls.lock(),
        vec![("h1", (7, Some(true))), ("h2", (7, Some(true)))]
    );
}

#[test]
fn test_socket_payload_from_json() {
    let bus = EventBus::new();
    let fens = Arc::new(Mutex::new(Vec::new()));
    let f = fens.clone();
    bus.subscribe::<SocketInFen, _>(move |update| f.lock().push(update.fen.clone()));

    bus.emit_json::<SocketInFen>(json!({
        "id": "q7ZvsdUF",
        "fen": "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR",
        "lm": "e2e4",
        "wc": 180
    }))
    .unwrap();

    assert_eq!(fens.lock().len(), 1);
}

#[tokio::test]
async fn test_after_resolves_only_after_complete() {
    let bus = EventBus::new();
    let mut wait = Box::pin(bus.after(OneTimeEvent::DialogPolyfill));

    assert!(timeout(Duration::from_millis(20), &mut wait).await.is_err());
    assert!(!bus.past(OneTimeEvent::DialogPolyfill));

    bus.complete(OneTimeEvent::DialogPolyfill, json!(42));
    assert_eq!(wait.await.unwrap(), json!(42));
    assert!(bus.past(OneTimeEvent::DialogPolyfill));
}

#[tokio::test]
async fn test_complete_before_after_resolves_immediately() {
    let bus = EventBus::new();
    bus.complete(OneTimeEvent::BotdevImagesReady, json!(42));

    let value = timeout(
        Duration::from_millis(100),
        bus.after(OneTimeEvent::BotdevImagesReady),
    )
    .await
    .expect("already completed")
    .unwrap();
    assert_eq!(value, json!(42));
}

#[tokio::test]
async fn test_first_completion_wins() {
    let bus = EventBus::new();
    let early = bus.after(OneTimeEvent::SocketHasConnected);

    assert!(bus.complete(OneTimeEvent::SocketHasConnected, json!(1)));
    assert!(!bus.complete(OneTimeEvent::SocketHasConnected, json!(2)));

    let late = bus.after(OneTimeEvent::SocketHasConnected);
    assert_eq!(early.await.unwrap(), json!(1));
    assert_eq!(late.await.unwrap(), json!(1));
}

#[tokio::test]
async fn test_three_waiters_resolve_together() {
    let bus = Arc::new(EventBus::new());
    let waiters: Vec<_> = (0..3)
        .map(|_| tokio::spawn(bus.after(OneTimeEvent::SocketHasConnected)))
        .collect();

    tokio::task::yield_now().await;
    assert_eq!(
        bus.state(OneTimeEvent::SocketHasConnected),
        OneTimeState::Pending
    );
    for waiter in &waiters {
        assert!(!waiter.is_finished());
    }

    bus.complete(OneTimeEvent::SocketHasConnected, Value::Null);
    for waiter in waiters {
        assert_eq!(waiter.await.unwrap().unwrap(), Value::Null);
    }
}

#[test]
fn test_past_lifecycle() {
    let bus = EventBus::new();
    assert_eq!(
        bus.state(OneTimeEvent::DialogPolyfill),
        OneTimeState::Unregistered
    );
    assert!(!bus.past(OneTimeEvent::DialogPolyfill));

    drop(bus.after(OneTimeEvent::DialogPolyfill));
    assert!(!bus.past(OneTimeEvent::DialogPolyfill));

    bus.complete(OneTimeEvent::DialogPolyfill, Value::Null);
    assert!(bus.past(OneTimeEvent::DialogPolyfill));
}

proptest! {
    #[test]
    fn prop_dispatch_follows_registration_order(
        ops in prop::collection::vec((0usize..6, any::<bool>()), 0..40)
    ) {
        let bus = EventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let handlers: Vec<Handler<Zen>> = (0..6)
            .map(|i| {
                let log = log.clone();
                Handler::new(move |_| log.lock().push(i))
            })
            .collect();

        // Model: ordered, duplicate-free list
        let mut model: Vec<usize> = Vec::new();
        for (index, register) in ops {
            if register {
                bus.on(&handlers[index]);
                if !model.contains(&index) {
                    model.push(index);
                }
            } else {
                bus.off(&handlers[index]);
                model.retain(|&i| i != index);
            }
        }

        let delivered = bus.emit::<Zen>(()).unwrap();
        prop_assert_eq!(delivered, model.len());
        prop_assert_eq!(&*log.lock(), &model);
        prop_assert_eq!(bus.subscriber_count::<Zen>(), model.len());
    }
}
