use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use reelkit_common_worker::{SlotStats, TaskHandle, TaskSlot, spawn, spawn_interval};
use tokio::time::sleep;

fn counting_task(name: &'static str, counter: &Arc<AtomicU32>) -> TaskHandle {
    let counter = counter.clone();
    spawn_interval(name, Duration::from_millis(250), move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[tokio::test(start_paused = true)]
async fn test_interval_task_ticks_immediately_then_every_period() {
    let counter = Arc::new(AtomicU32::new(0));
    let _handle = counting_task("interval", &counter);

    sleep(Duration::from_millis(1010)).await;

    // t = 0, 250, 500, 750, 1000
    assert_eq!(counter.load(Ordering::SeqCst), 5);
}

#[tokio::test(start_paused = true)]
async fn test_cancel_stops_ticks() {
    let counter = Arc::new(AtomicU32::new(0));
    let handle = counting_task("cancel", &counter);

    sleep(Duration::from_millis(300)).await;
    assert_eq!(counter.load(Ordering::SeqCst), 2);

    assert!(handle.cancel());
    sleep(Duration::from_millis(1000)).await;

    assert_eq!(counter.load(Ordering::SeqCst), 2);
    assert!(handle.is_finished());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_twice_is_harmless() {
    let counter = Arc::new(AtomicU32::new(0));
    let handle = counting_task("twice", &counter);

    assert!(handle.cancel());
    assert!(!handle.cancel());
    assert!(handle.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_handle_cancels_task() {
    let counter = Arc::new(AtomicU32::new(0));
    let handle = counting_task("dropped", &counter);

    sleep(Duration::from_millis(10)).await;
    drop(handle);
    sleep(Duration::from_millis(1000)).await;

    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_slot_restart_keeps_a_single_task_alive() {
    let first = Arc::new(AtomicU32::new(0));
    let second = Arc::new(AtomicU32::new(0));
    let mut slot = TaskSlot::new();

    slot.restart(|| counting_task("slot", &first));
    sleep(Duration::from_millis(300)).await;
    slot.restart(|| counting_task("slot", &second));
    sleep(Duration::from_millis(1000)).await;

    assert_eq!(first.load(Ordering::SeqCst), 2, "replaced task kept ticking");
    assert!(second.load(Ordering::SeqCst) >= 4);
    assert!(slot.is_running());
    assert_eq!(slot.stats(), SlotStats {
        started:   2,
        cancelled: 1,
    });
}

#[tokio::test(start_paused = true)]
async fn test_slot_cancel_is_idempotent() {
    let counter = Arc::new(AtomicU32::new(0));
    let mut slot = TaskSlot::new();
    assert!(!slot.cancel(), "empty slot has nothing to cancel");

    slot.restart(|| counting_task("idempotent", &counter));
    assert!(slot.cancel());
    assert!(!slot.cancel());
    assert!(!slot.is_running());
    assert_eq!(slot.stats(), SlotStats {
        started:   1,
        cancelled: 1,
    });
}

#[tokio::test(start_paused = true)]
async fn test_spawned_future_is_dropped_on_cancel() {
    let reached_end = Arc::new(AtomicU32::new(0));
    let flag = reached_end.clone();
    let handle = spawn("long", move |_ctx| async move {
        sleep(Duration::from_secs(60)).await;
        flag.store(1, Ordering::SeqCst);
    });

    sleep(Duration::from_secs(1)).await;
    handle.cancel();
    sleep(Duration::from_secs(120)).await;

    assert_eq!(reached_end.load(Ordering::SeqCst), 0);
}
