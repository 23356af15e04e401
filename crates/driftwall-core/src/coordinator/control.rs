//! The coordinator control loop

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::schedule::{RetryQueue, ScheduleEvent, Scheduler, StuckGuard};
use super::slots::SlotTable;
use super::{Launcher, StartupError};
use crate::config::{CoordinatorConfig, DriftwallConfig, StopRule};
use crate::display::{DisplayError, DisplayFactory, DisplaySink};
use crate::frame::FrameBuffer;
use crate::pool::TaskReport;
use crate::signal::{Signal, SignalRegister};
use crate::types::SlotId;

/// How long teardown waits for each slot's acknowledgment
const STOP_TIMEOUT: Duration = Duration::from_secs(1);

/// Outcome of one control tick, as seen through the register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Scheduler armed or still waiting on a deadline
    Waiting,
    /// Scheduler deadline reached; a random command was written
    Fired { command: u8 },
    /// Terminated feedback from an active slot; successor launched if any
    Handoff { from: SlotId, to: Option<SlotId> },
    /// Terminated feedback from a slot that is already dormant
    DuplicateFeedback { slot: u8 },
    /// Transient feedback cleared
    Acknowledged { slot: u8 },
    /// Stop rule precondition held; the target's stop code was written
    StopIssued { command: u8, target: SlotId },
    /// Stop rule precondition failed; a fresh command replaced it
    Regenerated { command: u8, replacement: u8 },
    /// Command still pending, counted towards the stuck limit
    Pending { command: u8 },
    /// Command sat too long and was cleared
    StuckCleared { command: u8 },
}

/// What a call to [`Coordinator::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickMode {
    /// The frame was presented
    Composite,
    /// A control step ran; sleep this long before the next tick
    Control { action: ControlAction, sleep: Duration },
    /// The display went away; the loop should end
    Closed,
}

/// Owns the display and steers slot transitions through the register
pub struct Coordinator<L: Launcher> {
    register: Arc<SignalRegister>,
    frame: Arc<FrameBuffer>,
    display: Box<dyn DisplaySink>,
    launcher: L,
    slots: SlotTable,
    rng: StdRng,
    scheduler: Scheduler,
    stuck: StuckGuard,
    retries: RetryQueue,
    tick_budget: Duration,
    restart_crashed: bool,
    /// Control ticks so far
    clock: u64,
    last_flush: Option<Instant>,
}

impl<L: Launcher> Coordinator<L> {
    /// Build a coordinator with every slot dormant
    ///
    /// Nothing is launched until [`start`](Self::start).
    pub fn new(
        config: &DriftwallConfig,
        register: Arc<SignalRegister>,
        frame: Arc<FrameBuffer>,
        display: Box<dyn DisplaySink>,
        launcher: L,
    ) -> Result<Self, StartupError> {
        config.validate()?;
        let settings: &CoordinatorConfig = &config.coordinator;

        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (retry_base, retry_cap) = settings.retry_bounds();

        Ok(Self {
            register,
            frame,
            display,
            launcher,
            slots: SlotTable::new(config.slots.clone()),
            rng,
            scheduler: Scheduler::new(settings.deadline_window(), settings.command_max),
            stuck: StuckGuard::new(settings.stuck_command_ticks),
            retries: RetryQueue::new(retry_base, retry_cap),
            tick_budget: settings.tick_budget(),
            restart_crashed: settings.restart_crashed,
            clock: 0,
            last_flush: None,
        })
    }

    /// Launch the initial slots and mark them active
    ///
    /// Any failure here is fatal, including a full queue. Slots launched
    /// before the failure are stopped again.
    pub fn start(&mut self) -> Result<(), StartupError> {
        let initial = self.slots.initial().to_vec();
        for slot in initial {
            if let Err(source) = self.launcher.launch(slot) {
                self.stop_all(STOP_TIMEOUT);
                return Err(StartupError::Launch { slot, source });
            }
            self.slots.set_active(slot, true);
        }
        log::info!(
            "Coordinator started on {} with {} slots active",
            self.display.name(),
            self.slots.active_slots().count()
        );
        Ok(())
    }

    /// One iteration of the loop at time `now`
    ///
    /// Presents when no flush happened yet or a full tick budget passed
    /// since the last one; otherwise runs a control step.
    pub fn tick(&mut self, now: Instant) -> TickMode {
        let since_flush = self.last_flush.map(|t| now.saturating_duration_since(t));

        match since_flush {
            Some(elapsed) if elapsed < self.tick_budget => {
                let action = self.control_step();
                TickMode::Control {
                    action,
                    sleep: self.tick_budget.saturating_sub(elapsed),
                }
            }
            _ => {
                self.last_flush = Some(now);
                match self.display.present(&self.frame) {
                    Ok(()) => TickMode::Composite,
                    Err(DisplayError::Closed) => {
                        log::info!("Display {} closed", self.display.name());
                        TickMode::Closed
                    }
                    Err(e) => {
                        log::warn!("Present failed: {}", e);
                        TickMode::Composite
                    }
                }
            }
        }
    }

    /// Advance the control clock and act on the register once
    ///
    /// Pool reports are drained after the register, so an acknowledgment
    /// still in the register is reported as the handoff and a `Finished`
    /// report only covers one that was overwritten.
    pub fn control_step(&mut self) -> ControlAction {
        self.clock += 1;
        self.service_retries();
        let action = self.act_on_register();
        self.drain_reports();
        action
    }

    fn act_on_register(&mut self) -> ControlAction {
        let raw = self.register.read();
        let signal = Signal::decode(raw);
        log::trace!("tick {}: register {:?}", self.clock, signal);

        match signal {
            Signal::Feedback { slot, terminated } => {
                self.stuck.reset();
                self.register.clear();
                if terminated {
                    self.on_terminated(slot)
                } else {
                    ControlAction::Acknowledged { slot }
                }
            }
            Signal::Command(command) => match self.slots.stop_rule(command) {
                Some(rule) => {
                    self.stuck.reset();
                    self.apply_stop_rule(rule)
                }
                None => self.watch_command(command, raw),
            },
            Signal::Idle | Signal::Stop(_) | Signal::Unknown(_) => {
                self.stuck.reset();
                self.run_scheduler()
            }
        }
    }

    /// Run until `shutdown` is set or the display closes, then stop every
    /// active slot
    pub fn run(mut self, shutdown: Arc<AtomicBool>) {
        log::info!("Coordinator loop running, tick budget {:?}", self.tick_budget);

        while !shutdown.load(Ordering::Relaxed) {
            match self.tick(Instant::now()) {
                TickMode::Composite => {}
                TickMode::Control { sleep, .. } => {
                    if !sleep.is_zero() {
                        thread::sleep(sleep);
                    }
                }
                TickMode::Closed => break,
            }
        }

        self.stop_all(STOP_TIMEOUT);
        log::info!("Coordinator stopped after {} control ticks", self.clock);
    }

    /// Stop active slots one by one, waiting up to `timeout` for each
    /// acknowledgment
    pub fn stop_all(&mut self, timeout: Duration) {
        self.retries.clear();
        let active: Vec<SlotId> = self.slots.active_slots().collect();

        for slot in active {
            self.register.write(slot.stop_code());
            let ack = Signal::terminated(slot);
            let deadline = Instant::now() + timeout;

            loop {
                let seen = self.register.signal();
                if seen == ack {
                    break;
                }
                if Instant::now() >= deadline {
                    log::warn!("{} did not acknowledge its stop code", slot);
                    break;
                }
                // Other workers may still overwrite the register
                if seen != Signal::Stop(slot) {
                    self.register.write(slot.stop_code());
                }
                thread::sleep(Duration::from_millis(1));
            }
            self.slots.set_active(slot, false);
        }
        self.register.clear();
    }

    pub fn is_active(&self, slot: SlotId) -> bool {
        self.slots.is_active(slot)
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn pending_retries(&self) -> usize {
        self.retries.len()
    }

    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    pub fn launcher_mut(&mut self) -> &mut L {
        &mut self.launcher
    }

    fn on_terminated(&mut self, raw_slot: u8) -> ControlAction {
        let slot = match SlotId::new(raw_slot) {
            Some(slot) if self.slots.is_active(slot) => slot,
            _ => {
                log::debug!("Ignoring duplicate termination from slot {}", raw_slot);
                return ControlAction::DuplicateFeedback { slot: raw_slot };
            }
        };

        self.slots.set_active(slot, false);
        self.retries.cancel(slot);

        let successor = self.slots.successor(slot);
        match successor {
            Some(next) => {
                log::info!("{} terminated, handing off to {}", slot, next);
                self.launch(next, 1);
            }
            None => log::info!("{} terminated", slot),
        }

        ControlAction::Handoff {
            from: slot,
            to: successor,
        }
    }

    fn apply_stop_rule(&mut self, rule: StopRule) -> ControlAction {
        if self.slots.is_active(rule.requires_active) {
            log::info!("Command {}: stopping {}", rule.command, rule.target);
            self.register.write(rule.target.stop_code());
            return ControlAction::StopIssued {
                command: rule.command,
                target: rule.target,
            };
        }

        let replacement = self.scheduler.random_command(&mut self.rng);
        log::debug!(
            "Command {}: {} not active, regenerated as {}",
            rule.command,
            rule.requires_active,
            replacement
        );
        self.register.write(replacement as i32);
        ControlAction::Regenerated {
            command: rule.command,
            replacement,
        }
    }

    fn watch_command(&mut self, command: u8, raw: i32) -> ControlAction {
        if self.stuck.observe(raw) {
            log::debug!("Command {} went unanswered, clearing", command);
            self.register.clear();
            return ControlAction::StuckCleared { command };
        }
        ControlAction::Pending { command }
    }

    fn run_scheduler(&mut self) -> ControlAction {
        match self.scheduler.poll(self.clock, &mut self.rng) {
            ScheduleEvent::Armed { deadline } => {
                log::trace!("Next command scheduled for tick {}", deadline);
                ControlAction::Waiting
            }
            ScheduleEvent::Waiting { .. } => ControlAction::Waiting,
            ScheduleEvent::Fire { command } => {
                log::debug!("Tick {}: scheduled command {}", self.clock, command);
                self.register.write(command as i32);
                ControlAction::Fired { command }
            }
        }
    }

    fn drain_reports(&mut self) {
        while let Some(report) = self.launcher.try_recv_report() {
            match report {
                TaskReport::Finished { slot } => {
                    if self.slots.is_active(slot) {
                        log::debug!("{} returned without a visible acknowledgment", slot);
                        self.on_terminated(slot.get());
                    }
                }
                TaskReport::Panicked { slot, message } => {
                    if !self.slots.is_active(slot) {
                        continue;
                    }
                    self.slots.set_active(slot, false);
                    if self.restart_crashed {
                        log::warn!("{} crashed ({}), relaunching", slot, message);
                        self.launch(slot, 1);
                    } else {
                        log::warn!("{} crashed ({}), leaving it dormant", slot, message);
                    }
                }
            }
        }
    }

    fn service_retries(&mut self) {
        if self.retries.is_empty() {
            return;
        }
        for retry in self.retries.drain_due(self.clock) {
            if self.slots.is_active(retry.slot) {
                continue;
            }
            log::debug!("Retrying launch of {} (attempt {})", retry.slot, retry.attempts + 1);
            self.launch(retry.slot, retry.attempts + 1);
        }
    }

    /// Launch `slot`, marking it active on success; `attempt` counts from 1
    fn launch(&mut self, slot: SlotId, attempt: u32) {
        if self.slots.is_active(slot) {
            log::debug!("{} already active, not launching again", slot);
            return;
        }

        match self.launcher.launch(slot) {
            Ok(()) => self.slots.set_active(slot, true),
            Err(e) if e.is_transient() => {
                let due = self.retries.push(slot, attempt, self.clock);
                log::warn!("Launch of {} failed: {}, retrying at tick {}", slot, e, due);
            }
            Err(e) => log::error!("Launch of {} failed: {}", slot, e),
        }
    }
}

/// Handle to a coordinator running on its own thread
pub struct CoordinatorHandle {
    shutdown: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl CoordinatorHandle {
    /// Ask the loop to stop its slots and exit
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    pub fn is_running(&self) -> bool {
        self.thread.as_ref().map(|h| !h.is_finished()).unwrap_or(false)
    }

    /// Wait for the coordinator thread to exit
    pub fn join(mut self) {
        if let Some(handle) = self.thread.take() {
            if handle.join().is_err() {
                log::error!("Coordinator thread panicked");
            }
        }
    }
}

/// Start a coordinator on a thread named `coordinator`
///
/// The display is opened and the initial slots launched on that thread;
/// this call blocks until both succeeded or one failed.
pub fn spawn<L>(
    config: DriftwallConfig,
    register: Arc<SignalRegister>,
    frame: Arc<FrameBuffer>,
    display_factory: DisplayFactory,
    launcher: L,
) -> Result<CoordinatorHandle, StartupError>
where
    L: Launcher + 'static,
{
    let shutdown = Arc::new(AtomicBool::new(false));
    let (ready_tx, ready_rx) = std::sync::mpsc::channel();
    let flag = shutdown.clone();

    let thread = thread::Builder::new()
        .name("coordinator".to_string())
        .spawn(move || {
            let started = display_factory()
                .map_err(StartupError::from)
                .and_then(|display| Coordinator::new(&config, register, frame, display, launcher))
                .and_then(|mut coordinator| coordinator.start().map(|()| coordinator));

            match started {
                Ok(coordinator) => {
                    let _ = ready_tx.send(Ok(()));
                    coordinator.run(flag);
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                }
            }
        })
        .map_err(|e| StartupError::Spawn(e.to_string()))?;

    let handle = CoordinatorHandle {
        shutdown,
        thread: Some(thread),
    };

    match ready_rx.recv() {
        Ok(Ok(())) => Ok(handle),
        Ok(Err(e)) => {
            handle.join();
            Err(e)
        }
        Err(_) => {
            handle.join();
            Err(StartupError::Aborted)
        }
    }
}
