use std::time::Duration;

use crossterm::event::{Event, EventStream};
use futures::StreamExt;
use rand::rngs::StdRng;
use tokio::{
    sync::{mpsc::Sender, watch},
    task::{AbortHandle, JoinSet},
    time::{Instant, MissedTickBehavior, interval, sleep, sleep_until},
};
use tracing::debug;

use crate::{
    domain::{
        flash::{DecayTicket, LightningFlash},
        weather::{FIRST_DRIFT_DELAY, WeatherState, next_drift_delay},
    },
    scene::lightning::{self, FollowUp, Strike, TriggerDecision},
};

#[derive(Debug)]
pub enum AppEvent {
    Bootstrap,
    TickFrame,
    Strike(Strike),
    /// Echo flash following a strike.
    Flash(LightningFlash),
    FlashDecay {
        generation: u64,
    },
    ThunderTone,
    Input(Event),
    Quit,
}

pub fn spawn_input_task() -> impl futures::Stream<Item = Event> {
    EventStream::new().filter_map(|event| async move { event.ok() })
}

pub fn start_frame_task(tasks: &mut JoinSet<()>, tx: Sender<AppEvent>, fps: u8) {
    let fps = fps.clamp(15, 60);
    tasks.spawn(async move {
        let mut ticker = interval(Duration::from_millis(1000_u64 / u64::from(fps)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::TickFrame).await.is_err() {
                break;
            }
        }
    });
}

/// Periodic thunder check. A strike is sent as one event; its echo flashes
/// and tone follow at their planned offsets from the strike.
pub fn start_lightning_task(
    tasks: &mut JoinSet<()>,
    tx: Sender<AppEvent>,
    weather: watch::Receiver<WeatherState>,
    mut rng: StdRng,
) {
    tasks.spawn(async move {
        let mut delay = lightning::first_check_delay(&mut rng);
        loop {
            sleep(delay).await;
            let probability = weather.borrow().thunder_probability;
            match lightning::check(&mut rng, probability) {
                TriggerDecision::Hold { retry_in } => {
                    debug!(probability, ?retry_in, "no strike this time");
                    delay = retry_in;
                }
                TriggerDecision::Strike(strike) => {
                    let started = Instant::now();
                    let follow_ups = strike.follow_ups();
                    let next_check_in = strike.next_check_in;
                    debug!(
                        bolts = strike.bolts.len(),
                        echoes = strike.echoes.len(),
                        ?next_check_in,
                        "strike"
                    );
                    if tx.send(AppEvent::Strike(strike)).await.is_err() {
                        break;
                    }
                    for (after, follow_up) in follow_ups {
                        sleep_until(started + after).await;
                        let event = match follow_up {
                            FollowUp::Flash(flash) => AppEvent::Flash(flash),
                            FollowUp::Tone => AppEvent::ThunderTone,
                        };
                        if tx.send(event).await.is_err() {
                            return;
                        }
                    }
                    delay = next_check_in.saturating_sub(started.elapsed());
                }
            }
        }
    });
}

/// Nudges the published weather: once after [`FIRST_DRIFT_DELAY`], then every
/// 10 to 30 seconds.
pub fn start_drift_task(
    tasks: &mut JoinSet<()>,
    weather: watch::Sender<WeatherState>,
    mut rng: StdRng,
) {
    tasks.spawn(async move {
        sleep(FIRST_DRIFT_DELAY).await;
        loop {
            weather.send_modify(|state| *state = state.drifted(&mut rng));
            debug!(weather = ?*weather.borrow(), "weather drifted");
            sleep(next_drift_delay(&mut rng)).await;
        }
    });
}

pub fn schedule_flash_decay(
    tasks: &mut JoinSet<()>,
    tx: Sender<AppEvent>,
    ticket: DecayTicket,
) -> AbortHandle {
    tasks.spawn(async move {
        sleep(ticket.after).await;
        let _ = tx
            .send(AppEvent::FlashDecay {
                generation: ticket.generation,
            })
            .await;
    })
}
