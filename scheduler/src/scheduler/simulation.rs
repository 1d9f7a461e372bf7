use super::{
    algorithm::Algorithm,
    clock::Clock,
    config::{SchedulerConfig, Workload},
    error::{ConfigError, ExportError, SchedulerError},
    event::{Event, EventKind, Observer},
    export,
    process::{Burst, Pid, Process, ProcessState},
    queue::ReadyQueue,
    resource::{Resource, ResourceKind},
    snapshot::Snapshot,
    stats::{ProcessStats, Summary},
    Policy,
};
use log::{debug, info, trace, warn};
use std::{
    cmp::Reverse,
    collections::{HashSet, VecDeque},
    path::Path,
};

/// Discrete-time CPU/I/O scheduler.
///
/// Every call to [`Scheduler::step`] resolves exactly one tick:
/// arrivals are admitted, every resource runs for one tick and completed
/// processes are routed, idle CPUs are dispatched, preemptive policies get to
/// displace running processes, idle I/O devices are dispatched and finally the
/// clock advances.
pub struct Scheduler {
    clock: Clock,
    algorithm: Algorithm,
    policy: Box<dyn Policy>,
    verbose: bool,
    ready_queue: ReadyQueue,
    wait_queue: VecDeque<Process>,
    future_processes: Vec<Process>,
    cpus: Vec<Resource>,
    io_devices: Vec<Resource>,
    finished: Vec<Process>,
    events: Vec<Event>,
    known_pids: HashSet<Pid>,
    observer: Option<Box<dyn Observer>>,
}

impl Scheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        let num_cpus = if config.num_cpus == 0 {
            warn!("A scheduler needs at least one CPU, using 1");
            1
        } else {
            config.num_cpus
        };
        let policy = config.algorithm.policy();
        info!(
            "Scheduler initialized: policy={}, cpus={}, io_devices={}",
            policy.name(),
            num_cpus,
            config.num_io_devices
        );

        Self {
            clock: Clock::new(),
            algorithm: config.algorithm,
            policy,
            verbose: config.verbose,
            ready_queue: ReadyQueue::new(),
            wait_queue: VecDeque::new(),
            future_processes: Vec::new(),
            cpus: (0..num_cpus).map(Resource::cpu).collect(),
            io_devices: (0..config.num_io_devices).map(Resource::io).collect(),
            finished: Vec::new(),
            events: Vec::new(),
            known_pids: HashSet::new(),
            observer: None,
        }
    }

    pub fn with_algorithm(algorithm: Algorithm) -> Self {
        Scheduler::new(SchedulerConfig::with_algorithm(algorithm))
    }

    pub fn from_workload(workload: Workload) -> Result<Self, ConfigError> {
        let mut scheduler = Scheduler::new(workload.config);
        for spec in workload.processes {
            scheduler.add_process(spec.into())?;
        }
        Ok(scheduler)
    }

    pub fn set_observer<O>(&mut self, observer: O)
    where
        O: Observer + 'static,
    {
        self.observer = Some(Box::new(observer));
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    pub fn now(&self) -> u64 {
        self.clock.now()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn policy_name(&self) -> &'static str {
        self.policy.name()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn finished(&self) -> &[Process] {
        &self.finished
    }

    pub fn cpus(&self) -> &[Resource] {
        &self.cpus
    }

    pub fn io_devices(&self) -> &[Resource] {
        &self.io_devices
    }

    /// Every process the scheduler knows about, wherever it currently is.
    pub fn processes(&self) -> Vec<&Process> {
        let mut processes: Vec<&Process> = self
            .future_processes
            .iter()
            .chain(self.ready_queue.iter())
            .chain(self.wait_queue.iter())
            .chain(self.cpus.iter().filter_map(Resource::current))
            .chain(self.io_devices.iter().filter_map(Resource::current))
            .chain(self.finished.iter())
            .collect();
        processes.sort_by_key(|process| process.pid());
        processes
    }

    pub fn process(&self, pid: Pid) -> Option<&Process> {
        self.processes()
            .into_iter()
            .find(|process| process.pid() == pid)
    }

    pub fn add_process(&mut self, mut process: Process) -> Result<(), SchedulerError> {
        process.validate()?;
        if !self.known_pids.insert(process.pid()) {
            return Err(SchedulerError::DuplicatePid(process.pid()));
        }

        if process.arrival_time() <= self.clock.now() {
            self.admit(process, EventKind::Enqueue);
        } else {
            process.set_state(ProcessState::Unarrived);
            self.future_processes.push(process);
        }
        Ok(())
    }

    /// True while anything is queued, running or yet to arrive.
    pub fn has_pending_work(&self) -> bool {
        !self.ready_queue.is_empty()
            || !self.wait_queue.is_empty()
            || !self.future_processes.is_empty()
            || self.cpus.iter().any(Resource::is_busy)
            || self.io_devices.iter().any(Resource::is_busy)
    }

    pub fn step(&mut self) -> Result<(), SchedulerError> {
        self.admit_arrivals();
        self.tick_cpus();
        self.tick_io_devices();
        self.dispatch_cpus()?;
        self.preempt_running()?;
        self.dispatch_io()?;
        self.clock.tick();

        let snapshot = self.snapshot();
        trace!("{:?}", snapshot);
        if let Some(observer) = self.observer.as_mut() {
            observer.on_step(&snapshot);
        }
        Ok(())
    }

    pub fn run(&mut self) -> Result<(), SchedulerError> {
        while self.has_pending_work() {
            self.step()?;
        }
        Ok(())
    }

    /// Like [`Scheduler::run`], but gives up after `limit` steps.
    pub fn run_with_step_limit(&mut self, limit: u64) -> Result<(), SchedulerError> {
        let mut steps = 0;
        while self.has_pending_work() {
            if steps == limit {
                return Err(SchedulerError::StepLimit(limit));
            }
            self.step()?;
            steps += 1;
        }
        Ok(())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            clock: self.clock.now(),
            ready: self.ready_queue.pids(),
            wait: self.wait_queue.iter().map(Process::pid).collect(),
            cpu: self.cpus.iter().map(Resource::current_pid).collect(),
            io: self.io_devices.iter().map(Resource::current_pid).collect(),
            finished: self.finished.iter().map(Process::pid).collect(),
        }
    }

    pub fn timeline(&self) -> String {
        self.events
            .iter()
            .map(Event::timeline_entry)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn stats(&self) -> Vec<ProcessStats> {
        self.finished.iter().filter_map(ProcessStats::from_process).collect()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_stats(&self.stats(), self.clock.now())
    }

    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        export::write_json(&self.events, path.as_ref())?;
        info!("Timeline exported to {}", path.as_ref().display());
        Ok(())
    }

    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> Result<(), ExportError> {
        export::write_csv(&self.events, path.as_ref())?;
        info!("Timeline exported to {}", path.as_ref().display());
        Ok(())
    }

    fn admit_arrivals(&mut self) {
        let now = self.clock.now();
        let (arrived, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.future_processes)
            .into_iter()
            .partition(|process| process.arrival_time() <= now);
        self.future_processes = pending;

        for process in arrived {
            self.admit(process, EventKind::Arrival);
        }
    }

    fn admit(&mut self, mut process: Process, kind: EventKind) {
        let pid = process.pid();
        let queue = if process.current_burst().is_some_and(|burst| burst.is_io()) {
            process.set_state(ProcessState::Waiting);
            self.wait_queue.push_back(process);
            "wait"
        } else {
            process.set_state(ProcessState::Ready);
            self.policy.reinsert(&mut self.ready_queue, process);
            "ready"
        };
        self.record(
            kind,
            format!("P{pid} added to {queue} queue"),
            Some(pid),
            None,
        );
    }

    fn tick_cpus(&mut self) {
        for index in 0..self.cpus.len() {
            let label = self.cpus[index].label();
            if let Some(process) = self.cpus[index].tick() {
                self.route(process, ResourceKind::Cpu, label);
                continue;
            }
            if !self.policy.quantum_preemption() {
                continue;
            }

            let expired = self.cpus[index]
                .current_mut()
                .map(|process| process.consume_quantum() == 0 && process.remaining_burst_time() > 0)
                .unwrap_or(false);
            if !expired {
                continue;
            }
            if let Some(mut process) = self.cpus[index].preempt() {
                let pid = process.pid();
                process.reset_quantum();
                process.set_state(ProcessState::Ready);
                self.policy.reinsert(&mut self.ready_queue, process);
                self.record(
                    EventKind::Preempted,
                    format!("P{pid} quantum expired"),
                    Some(pid),
                    Some(label),
                );
            }
        }
    }

    fn tick_io_devices(&mut self) {
        for index in 0..self.io_devices.len() {
            if let Some(process) = self.io_devices[index].tick() {
                let label = self.io_devices[index].label();
                self.route(process, ResourceKind::Io, label);
            }
        }
    }

    /// Sends a process whose burst just completed to wherever its next burst
    /// belongs.
    fn route(&mut self, mut process: Process, from: ResourceKind, device: String) {
        let pid = process.pid();
        let finished_what = match from {
            ResourceKind::Cpu => "CPU",
            ResourceKind::Io => "I/O",
        };

        let (kind, destination) = match process.current_burst() {
            Some(Burst::Cpu(_)) => {
                process.set_state(ProcessState::Ready);
                self.policy.reinsert(&mut self.ready_queue, process);
                let kind = match from {
                    ResourceKind::Cpu => EventKind::CpuToReady,
                    ResourceKind::Io => EventKind::IoToReady,
                };
                (kind, "ready queue")
            }
            Some(Burst::Io(_)) => {
                process.set_state(ProcessState::Waiting);
                self.wait_queue.push_back(process);
                let kind = match from {
                    ResourceKind::Cpu => EventKind::CpuToIo,
                    ResourceKind::Io => EventKind::IoToIo,
                };
                (kind, "wait queue")
            }
            None => {
                process.mark_finished(self.clock.now());
                self.finished.push(process);
                self.record(
                    EventKind::Finished,
                    format!("P{pid} finished all bursts"),
                    Some(pid),
                    Some(device),
                );
                return;
            }
        };

        self.record(
            kind,
            format!("P{pid} finished {finished_what} → {destination}"),
            Some(pid),
            Some(device),
        );
    }

    /// Hands idle CPUs the best ready processes, in ascending CPU order.
    fn dispatch_cpus(&mut self) -> Result<(), SchedulerError> {
        for index in 0..self.cpus.len() {
            if self.cpus[index].is_busy() {
                continue;
            }
            let Some(process) = self.policy.select(&mut self.ready_queue) else {
                break;
            };
            self.dispatch_cpu(index, process)?;
        }
        Ok(())
    }

    /// Displaces the worst running process while the best ready process beats
    /// it. Runs after idle CPUs were filled, so it only fires when every CPU is
    /// busy.
    fn preempt_running(&mut self) -> Result<(), SchedulerError> {
        if !self.policy.preemptive() {
            return Ok(());
        }

        loop {
            let policy = &self.policy;
            let Some(candidate) = self
                .ready_queue
                .peek_min_by_key(|process| policy.key(process))
            else {
                break;
            };
            // Ties on the worst key go to the lowest CPU id
            let worst = self
                .cpus
                .iter()
                .enumerate()
                .filter_map(|(index, cpu)| cpu.current().map(|running| (index, running)))
                .min_by_key(|(_, running)| Reverse(policy.key(running)));
            let Some((index, running)) = worst else {
                break;
            };
            if !policy.preempts(running, candidate) {
                break;
            }

            let label = self.cpus[index].label();
            if let Some(mut process) = self.cpus[index].preempt() {
                let pid = process.pid();
                process.set_state(ProcessState::Ready);
                self.policy.reinsert(&mut self.ready_queue, process);
                self.record(
                    EventKind::Preempted,
                    format!("P{pid} preempted on {label}"),
                    Some(pid),
                    Some(label),
                );
            }
            if let Some(process) = self.policy.select(&mut self.ready_queue) {
                self.dispatch_cpu(index, process)?;
            }
        }
        Ok(())
    }

    /// I/O is always served first come first served.
    fn dispatch_io(&mut self) -> Result<(), SchedulerError> {
        for index in 0..self.io_devices.len() {
            if self.io_devices[index].is_busy() {
                continue;
            }
            let Some(process) = self.wait_queue.pop_front() else {
                break;
            };
            let pid = process.pid();
            self.io_devices[index].assign(process, &self.clock)?;
            let label = self.io_devices[index].label();
            self.record(
                EventKind::DispatchIo,
                format!("P{pid} dispatched to {label}"),
                Some(pid),
                Some(label),
            );
        }
        Ok(())
    }

    fn dispatch_cpu(&mut self, index: usize, process: Process) -> Result<(), SchedulerError> {
        let pid = process.pid();
        self.cpus[index].assign(process, &self.clock)?;
        let label = self.cpus[index].label();
        self.record(
            EventKind::DispatchCpu,
            format!("P{pid} dispatched to {label}"),
            Some(pid),
            Some(label),
        );
        Ok(())
    }

    fn record(
        &mut self,
        kind: EventKind,
        description: String,
        process: Option<Pid>,
        device: Option<String>,
    ) {
        let event = Event {
            time: self.clock.now(),
            event: description,
            event_type: kind,
            process,
            device,
            ready_queue: self.ready_queue.pids(),
            wait_queue: self.wait_queue.iter().map(Process::pid).collect(),
            cpus: self.cpus.iter().map(Resource::current_pid).collect(),
            ios: self.io_devices.iter().map(Resource::current_pid).collect(),
        };

        if self.verbose {
            info!("{}", event.timeline_entry());
        } else {
            debug!("{}", event.timeline_entry());
        }
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(&event);
        }
        self.events.push(event);
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::new(SchedulerConfig::default())
    }
}
