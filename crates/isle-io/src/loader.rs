//! Semicolon-CSV input loaders.
//!
//! # File formats
//!
//! All three inputs are headerless, `;`-separated, and ragged: a row may stop
//! early, and missing numeric cells read as zero (or unreachable, for the
//! geography matrix).
//!
//! ```csv
//! # strategies            id;nationality;w1;w2;w3;w4;w5;w6;house_pct;pet_pct
//! 1;Norwegian;0;10;0;40;0;50;20;30
//!
//! # initial data          house_id;color;nationality;drink;cigarette;pet
//! 1;yellow;Norwegian;water;Dunhill;cats
//!
//! # geography             id;name;d1;...;dN   (NA or empty = unreachable)
//! 1;Yellow house;0;2;NA;7;1
//! ```
//!
//! Each loader has a `_reader` variant taking any `Read`, so tests can feed
//! a `std::io::Cursor` instead of a file.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use rustc_hash::FxHashMap;

use isle_core::{AgentId, HouseId};
use isle_world::{Agent, House, TravelMatrix};

use crate::error::{IoError, IoResult};

/// Number of route-weight columns in a strategy row, one per color index.
const ROUTE_WEIGHT_COLUMNS: u32 = 6;

// ── Strategies ────────────────────────────────────────────────────────────────

/// One agent's loaded strategy row: route weights keyed by 1-based color
/// index, plus the two exchange propensities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strategy {
    pub nationality: String,
    pub route_weights: FxHashMap<u32, u32>,
    pub house_exchange_pct: u32,
    pub pet_exchange_pct: u32,
}

pub fn load_strategies(path: &Path) -> IoResult<BTreeMap<AgentId, Strategy>> {
    load_strategies_reader(std::fs::File::open(path)?)
}

/// Like [`load_strategies`] but from any `Read` source.
pub fn load_strategies_reader<R: Read>(reader: R) -> IoResult<BTreeMap<AgentId, Strategy>> {
    let mut strategies = BTreeMap::new();

    for result in ragged_reader(reader).records() {
        let row = result?;
        if row.len() < 2 {
            continue;
        }

        let id = AgentId(cell_u32(&row, 0)?);
        let mut route_weights = FxHashMap::default();
        for index in 1..=ROUTE_WEIGHT_COLUMNS {
            let weight = cell_u32_or_zero(&row, (index + 1) as usize)?;
            route_weights.insert(index, weight);
        }

        strategies.insert(
            id,
            Strategy {
                nationality: cell(&row, 1).to_owned(),
                route_weights,
                house_exchange_pct: cell_u32_or_zero(&row, 8)?,
                pet_exchange_pct: cell_u32_or_zero(&row, 9)?,
            },
        );
    }
    Ok(strategies)
}

// ── Initial agent/house data ──────────────────────────────────────────────────

pub fn load_initial_data(
    path: &Path,
    strategies: &BTreeMap<AgentId, Strategy>,
) -> IoResult<(BTreeMap<AgentId, Agent>, BTreeMap<HouseId, House>)> {
    load_initial_data_reader(std::fs::File::open(path)?, strategies)
}

/// Build the agent and house maps from an initial-data source.
///
/// Agent ID equals house ID equals row ID; the house starts owned by its
/// agent.  Agents without a strategy row get zero weights and propensities.
pub fn load_initial_data_reader<R: Read>(
    reader: R,
    strategies: &BTreeMap<AgentId, Strategy>,
) -> IoResult<(BTreeMap<AgentId, Agent>, BTreeMap<HouseId, House>)> {
    let mut agents = BTreeMap::new();
    let mut houses = BTreeMap::new();

    for result in ragged_reader(reader).records() {
        let row = result?;
        if row.is_empty() {
            continue;
        }

        let id = cell_u32(&row, 0)?;
        let (agent_id, house_id) = (AgentId(id), HouseId(id));

        houses.insert(house_id, House::new(house_id, cell(&row, 1), agent_id));

        let (route_weights, house_pct, pet_pct) = match strategies.get(&agent_id) {
            Some(s) => (
                s.route_weights.clone(),
                s.house_exchange_pct,
                s.pet_exchange_pct,
            ),
            None => {
                tracing::warn!(agent = id, "no strategy row, agent never exchanges");
                (FxHashMap::default(), 0, 0)
            }
        };

        agents.insert(
            agent_id,
            Agent::new(
                agent_id,
                cell(&row, 2),
                cell(&row, 3),
                cell(&row, 4),
                cell(&row, 5),
                house_id,
                route_weights,
                house_pct,
                pet_pct,
            ),
        );
    }
    Ok((agents, houses))
}

// ── Geography ─────────────────────────────────────────────────────────────────

pub fn load_geography(path: &Path) -> IoResult<TravelMatrix> {
    load_geography_reader(std::fs::File::open(path)?)
}

/// Build the travel matrix from a geography source.
///
/// One row per house: `id;name;d1;...;dN`.  `NA` or an empty cell means
/// unreachable; the diagonal is always 0 regardless of what the file says.
pub fn load_geography_reader<R: Read>(reader: R) -> IoResult<TravelMatrix> {
    let rows: Vec<StringRecord> = ragged_reader(reader)
        .records()
        .collect::<Result<_, _>>()?;

    let n = rows.len() as u32;
    let mut matrix = TravelMatrix::new(n);

    for (i, row) in rows.iter().enumerate() {
        let from = HouseId(i as u32 + 1);
        let row_id = cell_u32(row, 0)?;
        if row_id != from.0 {
            tracing::warn!(row = i + 1, row_id, "geography row out of order, using position");
        }

        for j in 1..=n {
            let to = HouseId(j);
            if from == to {
                continue;
            }
            // Durations start at column 2, after id and name.
            let raw = cell(row, (j + 1) as usize);
            if raw.is_empty() || raw.eq_ignore_ascii_case("na") {
                continue;
            }
            let duration = raw
                .parse::<u32>()
                .map_err(|_| {
                    IoError::Parse(format!("bad duration {raw:?} in geography row {}", from.0))
                })?;
            matrix.set(from, to, Some(duration))?;
        }
    }
    Ok(matrix)
}

// ── Row helpers ───────────────────────────────────────────────────────────────

fn ragged_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader)
}

fn cell<'a>(row: &'a StringRecord, index: usize) -> &'a str {
    row.get(index).unwrap_or("")
}

fn cell_u32(row: &StringRecord, index: usize) -> IoResult<u32> {
    let raw = cell(row, index);
    raw.parse::<u32>()
        .map_err(|_| IoError::Parse(format!("expected a number, got {raw:?}")))
}

/// Missing or empty numeric cells read as zero.
fn cell_u32_or_zero(row: &StringRecord, index: usize) -> IoResult<u32> {
    let raw = cell(row, index);
    if raw.is_empty() {
        return Ok(0);
    }
    raw.parse::<u32>()
        .map_err(|_| IoError::Parse(format!("expected a number, got {raw:?}")))
}
