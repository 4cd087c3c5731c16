use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::Rng;
use tokio::{
    sync::mpsc,
    task::JoinHandle,
    time::{MissedTickBehavior, interval, sleep},
};

use crate::domain::weather::{Location, WeatherObservation};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    TickRefresh,
    Input(Event),
    LocationResolved(Location),
    ObservationFetched(WeatherObservation),
    FetchFailed(String),
    Quit,
}

/// Owns a background task; dropping the handle aborts it, so no further
/// events are sent once the owner lets go.
#[derive(Debug)]
pub struct TaskHandle(JoinHandle<()>);

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.0.abort();
    }
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

/// Per-frame tick. Late ticks are skipped rather than bursted.
pub fn start_frame_task(tx: mpsc::Sender<AppEvent>, fps: u8) -> TaskHandle {
    let fps = fps.clamp(15, 60);
    TaskHandle(tokio::spawn(async move {
        let mut ticker = interval(Duration::from_secs(1) / u32::from(fps));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    }))
}

pub fn start_refresh_task(tx: mpsc::Sender<AppEvent>, refresh_secs: u64) -> TaskHandle {
    TaskHandle(tokio::spawn(async move {
        let base = refresh_secs.max(1) as f32;
        loop {
            let wait_secs = {
                let mut rng = rand::rng();
                let jitter = rng.random_range(-0.05f32..0.05f32);
                (base * (1.0 + jitter)).max(1.0)
            };
            sleep(Duration::from_secs_f32(wait_secs)).await;
            if tx.send(AppEvent::TickRefresh).await.is_err() {
                break;
            }
        }
    }))
}

pub fn schedule_retry(tx: mpsc::Sender<AppEvent>, delay: Duration) -> TaskHandle {
    TaskHandle(tokio::spawn(async move {
        sleep(delay.max(Duration::from_secs(1))).await;
        let _ = tx.send(AppEvent::TickRefresh).await;
    }))
}
