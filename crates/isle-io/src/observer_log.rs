//! The observer log: the simulation's primary output file.
//!
//! One `seq;time;kind;fields...` line per [`LogRecord`], followed by a
//! `---- KNOWLEDGE ----` section dumping each agent's final knowledge map as
//! one `agent_id;{json}` line.  Knowledge JSON keys are emitted in ascending
//! agent-ID order so identical runs produce identical bytes.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use isle_event::LogRecord;
use isle_world::{Agent, Knowledge, World};

use crate::error::IoResult;

const KNOWLEDGE_SEPARATOR: &str = "---- KNOWLEDGE ----";

/// Streams log records and the final knowledge dump to one output.
pub struct ObserverLogWriter<W: Write> {
    out: BufWriter<W>,
}

impl ObserverLogWriter<File> {
    pub fn create(path: &Path) -> IoResult<Self> {
        Ok(Self::new(File::create(path)?))
    }
}

impl<W: Write> ObserverLogWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            out: BufWriter::new(writer),
        }
    }

    pub fn write_record(&mut self, record: &LogRecord) -> IoResult<()> {
        write!(self.out, "{};{};{}", record.seq, record.time.0, record.kind)?;
        for field in &record.fields {
            write!(self.out, ";{field}")?;
        }
        writeln!(self.out)?;
        Ok(())
    }

    pub fn write_log(&mut self, records: &[LogRecord]) -> IoResult<()> {
        for record in records {
            self.write_record(record)?;
        }
        Ok(())
    }

    /// Append the separator and one knowledge line per agent.
    pub fn write_knowledge_dump(&mut self, world: &World) -> IoResult<()> {
        writeln!(self.out, "{KNOWLEDGE_SEPARATOR}")?;
        for agent in world.agents.values() {
            writeln!(self.out, "{};{}", agent.id.0, knowledge_json(agent)?)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> IoResult<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// An agent's knowledge map as JSON with ascending-ID keys.
pub fn knowledge_json(agent: &Agent) -> IoResult<String> {
    let ordered: BTreeMap<u32, &Knowledge> =
        agent.knowledge.iter().map(|(id, k)| (id.0, k)).collect();
    Ok(serde_json::to_string(&ordered)?)
}
