//! Per-agent knowledge change logs.
//!
//! One `agent_{id}_knowledge.log` file per agent, appended to on every
//! knowledge change the scheduler reports through
//! [`SimObserver::on_knowledge_change`].  Hook methods cannot return errors,
//! so the first write failure is remembered and surfaced by
//! [`finish`][KnowledgeLogWriter::finish]; later hooks become no-ops.

use std::collections::hash_map::Entry;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use rustc_hash::FxHashMap;

use isle_core::{AgentId, SimTime};
use isle_event::EventKind;
use isle_sim::SimObserver;
use isle_world::Agent;

use crate::error::{IoError, IoResult};
use crate::observer_log::knowledge_json;

/// Writes `time;event_type;knowledge` lines, one file per agent.
pub struct KnowledgeLogWriter {
    dir: PathBuf,
    files: FxHashMap<AgentId, BufWriter<File>>,
    first_error: Option<IoError>,
}

impl KnowledgeLogWriter {
    /// Create the writer, making sure `dir` exists.
    pub fn new(dir: impl Into<PathBuf>) -> IoResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            files: FxHashMap::default(),
            first_error: None,
        })
    }

    /// The agent's log file, created with its header on first use.
    fn file_for(&mut self, agent: AgentId) -> IoResult<&mut BufWriter<File>> {
        match self.files.entry(agent) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = self.dir.join(format!("agent_{}_knowledge.log", agent.0));
                let mut file = BufWriter::new(File::create(path)?);
                writeln!(file, "# Agent {} Knowledge Log", agent.0)?;
                writeln!(file, "# Format: time;event_type;knowledge")?;
                Ok(entry.insert(file))
            }
        }
    }

    fn append(&mut self, time: SimTime, kind: EventKind, agent: &Agent) -> IoResult<()> {
        let json = knowledge_json(agent)?;
        let file = self.file_for(agent.id)?;
        writeln!(file, "{};{};{}", time.0, kind, json)?;
        Ok(())
    }

    /// Flush every file and report the first error any hook swallowed.
    pub fn finish(mut self) -> IoResult<()> {
        if let Some(error) = self.first_error.take() {
            return Err(error);
        }
        for file in self.files.values_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

impl SimObserver for KnowledgeLogWriter {
    fn on_knowledge_change(&mut self, time: SimTime, kind: EventKind, agent: &Agent) {
        if self.first_error.is_some() {
            return;
        }
        if let Err(error) = self.append(time, kind, agent) {
            tracing::warn!(agent = agent.id.0, %error, "knowledge log write failed");
            self.first_error = Some(error);
        }
    }
}
