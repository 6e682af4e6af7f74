//! The simulation environment and its batch protocol.
//!
//! # Batch protocol
//!
//! The clock jumps to the earliest occupied timestamp and drains everything
//! due there as one batch, in a fixed phase order:
//!
//! 1. Arrivals (`FinishTrip`), returning-home agents first so owners are back
//!    before visitors are judged against their presence; ties break on
//!    ascending agent ID.  A successful arrival may fire a house exchange
//!    immediately.
//! 2. Pet-exchange detection across every house, run only when the batch
//!    contained at least one arrival.
//! 3. Departures (`StartTrip`), ascending agent ID; each started trip
//!    enqueues its matching arrival.
//! 4. Externally queued exchange events, if any.
//!
//! Processing can enqueue more work at the current timestamp (zero-duration
//! legs), so the batch loop redrains until the slot stays empty.  Records are
//! appended after execution, in the phase order above, and a follow-up trip
//! is planned for every agent whose arrival was processed.

use isle_core::{AgentId, SimConfig, SimTime};
use isle_event::{
    Event, EventKind, FinishTrip, HouseExchange, LogRecord, PetExchange, StartTrip,
    detect_pet_exchanges,
};
use isle_world::{AgentRngs, World};

use crate::error::SimResult;
use crate::observer::SimObserver;
use crate::queue::EventQueue;

/// A complete simulation: world state, per-agent RNG streams, the event
/// queue, and the run log.
///
/// Built through [`EnvironmentBuilder`][crate::EnvironmentBuilder].
pub struct Environment {
    pub config: SimConfig,
    pub world: World,
    pub rngs: AgentRngs,

    pub(crate) queue: EventQueue,
    pub(crate) time: SimTime,
    pub(crate) log: Vec<LogRecord>,
    pub(crate) seq: u64,
}

struct Batch {
    finishes: Vec<FinishTrip>,
    starts: Vec<StartTrip>,
    queued_pets: Vec<PetExchange>,
    queued_houses: Vec<HouseExchange>,
}

impl Environment {
    /// Enqueue an event directly.  Normal runs only ever push initial trips
    /// this way; tests use it to stage arbitrary situations.
    pub fn push(&mut self, event: impl Into<Event>) {
        self.queue.push(event.into());
    }

    /// Current clock value: the timestamp of the batch being (or last)
    /// processed.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Records appended so far, in sequence order.
    pub fn log(&self) -> &[LogRecord] {
        &self.log
    }

    pub fn into_log(self) -> Vec<LogRecord> {
        self.log
    }

    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn next_event_time(&self) -> Option<SimTime> {
        self.queue.next_time()
    }

    /// Drive the simulation to completion and return the ordered log.
    ///
    /// Stops when the queue is empty or its earliest event lies past the
    /// horizon.  The log also stays reachable through
    /// [`log`][Environment::log] afterwards.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<&[LogRecord]> {
        while let Some(t) = self.queue.next_time() {
            if t > self.config.max_time {
                break;
            }
            self.time = t;
            tracing::debug!(time = t.0, pending = self.queue.len(), "advancing clock");
            observer.on_time_advance(t);

            // Redrain: a batch can enqueue more work at its own timestamp.
            while let Some(events) = self.queue.drain_at(t) {
                self.process_batch(events, observer)?;
            }
        }
        observer.on_sim_end(self.time);
        tracing::info!(
            final_time = self.time.0,
            records = self.log.len(),
            "simulation finished"
        );
        Ok(&self.log)
    }

    // ── Batch execution ───────────────────────────────────────────────────

    fn process_batch<O: SimObserver>(
        &mut self,
        events: Vec<Event>,
        observer: &mut O,
    ) -> SimResult<()> {
        let mut batch = self.partition(events);

        // Phase 1: arrivals.  House exchanges fire inside `run` so a rotated
        // ownership is visible to later arrivals in the same batch.
        let mut house_exchanges: Vec<HouseExchange> = Vec::new();
        for finish in &mut batch.finishes {
            let arrival = finish.run(&mut self.world, &mut self.rngs)?;
            for &other in &arrival.met {
                let time = self.time;
                observer.on_knowledge_change(
                    time,
                    EventKind::FinishTrip,
                    self.world.agent(finish.agent)?,
                );
                observer.on_knowledge_change(time, EventKind::FinishTrip, self.world.agent(other)?);
            }
            if let Some(exchange) = arrival.house_exchange {
                house_exchanges.push(exchange);
            }
        }

        // Phase 2: pet exchanges are only looked for when someone arrived.
        let mut pet_exchanges = Vec::new();
        if !batch.finishes.is_empty() {
            pet_exchanges = detect_pet_exchanges(&self.world, self.time, &mut self.rngs)?;
            for exchange in &mut pet_exchanges {
                exchange.run(&mut self.world)?;
            }
        }

        // Phase 3: departures.
        for start in &mut batch.starts {
            if let Some(follow_up) = start.run(&mut self.world, self.config.max_time)? {
                self.queue.push(follow_up.into());
            }
        }

        // Phase 4: exchange events pushed onto the queue from outside.  One
        // whose hosting owner has left by now is a silent no-op and leaves
        // no record.
        let mut executed_pets = Vec::new();
        for mut exchange in batch.queued_pets.drain(..) {
            if exchange.run(&mut self.world)? {
                executed_pets.push(exchange);
            }
        }
        batch.queued_pets = executed_pets;
        let mut executed_houses = Vec::new();
        for mut exchange in batch.queued_houses.drain(..) {
            if exchange.run(&mut self.world)? {
                executed_houses.push(exchange);
            }
        }
        batch.queued_houses = executed_houses;

        self.log_batch(&batch, &pet_exchanges, &house_exchanges, observer)?;

        // Every processed arrival plans that agent's next trip.
        for agent in batch.finishes.iter().map(|f| f.agent) {
            self.plan_next_trip(agent)?;
        }
        Ok(())
    }

    fn partition(&self, events: Vec<Event>) -> Batch {
        let mut batch = Batch {
            finishes: Vec::new(),
            starts: Vec::new(),
            queued_pets: Vec::new(),
            queued_houses: Vec::new(),
        };
        for event in events {
            match event {
                Event::FinishTrip(e) => batch.finishes.push(e),
                Event::StartTrip(e) => batch.starts.push(e),
                Event::ChangePet(e) => batch.queued_pets.push(e),
                Event::ChangeHouse(e) => batch.queued_houses.push(e),
            }
        }
        batch
            .finishes
            .sort_by_key(|f| (!f.is_return_home(&self.world), f.agent));
        batch.starts.sort_by_key(|s| s.agent);
        batch
    }

    /// Append this batch's records: arrivals, pet exchanges, house
    /// exchanges, started departures, then externally queued exchanges that
    /// actually executed.
    fn log_batch<O: SimObserver>(
        &mut self,
        batch: &Batch,
        pet_exchanges: &[PetExchange],
        house_exchanges: &[HouseExchange],
        observer: &mut O,
    ) -> SimResult<()> {
        for finish in &batch.finishes {
            let fields = finish.log_fields(&self.world)?;
            self.append(finish.time, EventKind::FinishTrip, fields, observer);
        }
        for exchange in pet_exchanges {
            let fields = exchange.log_fields(&self.world)?;
            self.append(exchange.time, EventKind::ChangePet, fields, observer);
        }
        for exchange in house_exchanges {
            let fields = exchange.log_fields(&self.world)?;
            self.append(exchange.time, EventKind::ChangeHouse, fields, observer);
        }
        // A start that failed its checks never happened; only departures that
        // actually left a house are logged.
        for start in batch.starts.iter().filter(|s| s.origin.is_some()) {
            let fields = start.log_fields(&self.world)?;
            self.append(start.time, EventKind::StartTrip, fields, observer);
        }
        for exchange in &batch.queued_pets {
            let fields = exchange.log_fields(&self.world)?;
            self.append(exchange.time, EventKind::ChangePet, fields, observer);
        }
        for exchange in &batch.queued_houses {
            let fields = exchange.log_fields(&self.world)?;
            self.append(exchange.time, EventKind::ChangeHouse, fields, observer);
        }
        Ok(())
    }

    fn append<O: SimObserver>(
        &mut self,
        time: SimTime,
        kind: EventKind,
        fields: Vec<String>,
        observer: &mut O,
    ) {
        self.seq += 1;
        let record = LogRecord {
            seq: self.seq,
            time,
            kind,
            fields,
        };
        observer.on_record(&record);
        self.log.push(record);
    }

    // ── Planning ──────────────────────────────────────────────────────────

    /// Queue the next trip for an agent that just arrived somewhere.
    ///
    /// At home the agent draws a weighted destination; away it heads back,
    /// provided a route home exists.  Agents already travelling again (a
    /// same-batch departure) are left alone.
    fn plan_next_trip(&mut self, agent_id: AgentId) -> SimResult<()> {
        let agent = self.world.agent(agent_id)?;
        if agent.travelling {
            return Ok(());
        }

        let target = if agent.location == agent.home {
            agent.choose_destination(
                &self.world.matrix,
                &self.world.houses,
                &self.world.colors,
                self.rngs.get_mut(agent_id),
            )
        } else if self.world.matrix.duration(agent.location, agent.home).is_some() {
            Some(agent.home)
        } else {
            tracing::warn!(
                agent = agent_id.0,
                location = agent.location.0,
                home = agent.home.0,
                "no route home, agent stays put"
            );
            None
        };

        if let Some(target) = target {
            self.queue
                .push(StartTrip::new(self.time, agent_id, target).into());
        }
        Ok(())
    }
}
