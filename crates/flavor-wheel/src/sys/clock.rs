use crate::events::AppEvent;
use async_channel::{Receiver, Sender};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::time::{self, Interval, MissedTickBehavior};

/// Frame ticks for coasting. [`FrameClock`] drives real ticks from the tokio
/// runtime; [`ManualClock`] only records requests so the event loop can be
/// stepped by hand.
pub trait FrameScheduler {
    fn start(&mut self);
    fn stop(&mut self);
    fn is_running(&self) -> bool;
    fn set_interval(&mut self, interval: Duration);
}

#[derive(Debug, Clone, Copy)]
enum ClockControl {
    Start,
    Stop,
    Interval(Duration),
}

/// Cancelable periodic tick sending [`AppEvent::Frame`].
pub struct FrameClock {
    control: Sender<ClockControl>,
    running: bool,
}

impl FrameClock {
    pub fn spawn(handle: &Handle, interval: Duration, tx: Sender<AppEvent>) -> Self {
        let (control, control_rx) = async_channel::unbounded();
        handle.spawn(run_clock(control_rx, tx, interval));
        Self {
            control,
            running: false,
        }
    }

    fn send(&self, msg: ClockControl) {
        if self.control.try_send(msg).is_err() {
            log::error!("Frame clock task is gone");
        }
    }
}

impl FrameScheduler for FrameClock {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.send(ClockControl::Start);
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.send(ClockControl::Stop);
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_interval(&mut self, interval: Duration) {
        self.send(ClockControl::Interval(interval));
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

fn ticker(period: Duration) -> Interval {
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

async fn run_clock(control: Receiver<ClockControl>, tx: Sender<AppEvent>, period: Duration) {
    let mut period = period.max(Duration::from_millis(1));
    let mut active: Option<Interval> = None;

    loop {
        tokio::select! {
            msg = control.recv() => match msg {
                Ok(ClockControl::Start) => active = Some(ticker(period)),
                Ok(ClockControl::Stop) => active = None,
                Ok(ClockControl::Interval(p)) => {
                    period = p.max(Duration::from_millis(1));
                    if active.is_some() {
                        active = Some(ticker(period));
                    }
                }
                Err(_) => break,
            },
            _ = next_tick(&mut active) => {
                if tx.send(AppEvent::Frame).await.is_err() {
                    break;
                }
            }
        }
    }
}

/// Scheduler that never ticks on its own.
#[derive(Debug, Default)]
pub struct ManualClock {
    running: bool,
    interval: Option<Duration>,
    pub starts: usize,
    pub stops: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval(&self) -> Option<Duration> {
        self.interval
    }
}

impl FrameScheduler for ManualClock {
    fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.starts += 1;
        }
    }

    fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.stops += 1;
        }
    }

    fn is_running(&self) -> bool {
        self.running
    }

    fn set_interval(&mut self, interval: Duration) {
        self.interval = Some(interval);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_counts_transitions() {
        let mut clock = ManualClock::new();
        clock.start();
        clock.start();
        assert!(clock.is_running());
        clock.stop();
        clock.stop();
        assert_eq!((clock.starts, clock.stops), (1, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_clock_ticks_only_while_started() {
        let (tx, rx) = async_channel::unbounded();
        let mut clock = FrameClock::spawn(&Handle::current(), Duration::from_millis(16), tx);

        time::sleep(Duration::from_millis(100)).await;
        assert!(rx.is_empty());

        clock.start();
        time::sleep(Duration::from_millis(50)).await;
        let ticks = rx.len();
        assert!(ticks >= 3, "got {ticks}");
        assert_eq!(rx.try_recv(), Ok(AppEvent::Frame));

        clock.stop();
        time::sleep(Duration::from_millis(5)).await;
        while rx.try_recv().is_ok() {}
        time::sleep(Duration::from_millis(100)).await;
        assert!(rx.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_frame_clock_ends_when_dropped() {
        let (tx, rx) = async_channel::unbounded();
        let clock = FrameClock::spawn(&Handle::current(), Duration::from_millis(16), tx);
        drop(clock);
        time::sleep(Duration::from_millis(10)).await;
        assert!(rx.is_closed());
    }
}
