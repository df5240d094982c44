use std::collections::HashSet;

use super::{error::AgentPoolError, ids::AgentName};

/// Fixed roster of agents handed out in round-robin order.
#[derive(Debug, Clone)]
pub struct AgentPool {
    agents: Vec<AgentName>,
    cursor: usize,
}

impl AgentPool {
    /// # Errors
    /// Fails when the roster is empty, a name is blank or too long, or the same
    /// agent appears twice.
    pub fn new<I, S>(names: I) -> Result<Self, AgentPoolError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut agents = Vec::new();
        let mut seen = HashSet::new();
        for name in names {
            let agent = AgentName::new(name.as_ref())?;
            if !seen.insert(agent.clone()) {
                return Err(AgentPoolError::Duplicate(agent.as_str().to_owned()));
            }
            agents.push(agent);
        }

        if agents.is_empty() {
            return Err(AgentPoolError::Empty);
        }

        Ok(Self { agents, cursor: 0 })
    }

    /// Returns the agent under the cursor and moves the cursor one place on.
    pub fn next_agent(&mut self) -> AgentName {
        let agent = self.agents[self.cursor].clone();
        self.cursor = (self.cursor + 1) % self.agents.len();
        agent
    }

    #[must_use]
    pub fn agents(&self) -> &[AgentName] {
        &self.agents
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
