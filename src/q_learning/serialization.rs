//! Persisted forms of a trained TD agent.
//!
//! * [`TabularPolicy`] - the value table as JSON, `state -> action -> value`
//! * [`SavedTdAgent`] - policy plus algorithm, settings and freeze flag, as MessagePack

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::{agent::instantiate_agent, settings::TdSettings, target::TdAlgorithm};
use crate::{Error, Result, ports::Learner, tictactoe::Mark};

/// Value table keyed by canonical-state string, then by decimal action index.
///
/// ```json
/// { "states": { "000000000": { "0": 0.1, "4": 0.35 } } }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TabularPolicy {
    pub states: BTreeMap<String, BTreeMap<String, f64>>,
}

impl TabularPolicy {
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create policy file {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer
            .flush()
            .map_err(|e| Error::io(format!("write policy file {}", path.display()), e))?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(format!("open policy file {}", path.display()), e))?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Full agent snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTdAgent {
    pub version: u32,
    pub algorithm: TdAlgorithm,
    pub mark: Mark,
    pub settings: TdSettings,
    pub frozen: bool,
    pub policy: TabularPolicy,
}

impl SavedTdAgent {
    pub const VERSION: u32 = 1;

    pub fn from_learner(agent: &dyn Learner) -> Self {
        Self {
            version: Self::VERSION,
            algorithm: agent.algorithm(),
            mark: agent.mark(),
            settings: *agent.settings(),
            frozen: agent.is_frozen(),
            policy: agent.dump_policy(),
        }
    }

    /// Rebuild a live agent.
    ///
    /// The random stream restarts from `settings.random_seed`; only the table
    /// and flags carry over.
    pub fn to_agent(&self) -> Result<Box<dyn Learner>> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }

        let mut agent = instantiate_agent(self.algorithm, self.mark, self.settings, Some(&self.policy))?;
        agent.set_frozen(self.frozen);
        Ok(agent)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create agent file {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write_named(&mut writer, self)?;
        writer
            .flush()
            .map_err(|e| Error::io(format!("write agent file {}", path.display()), e))?;

        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(format!("open agent file {}", path.display()), e))?;
        let reader = BufReader::new(file);

        Ok(rmp_serde::decode::from_read(reader)?)
    }
}
