use crate::application::AgentRepository;

pub(crate) struct ServerState {
    repository: AgentRepository,
}

impl ServerState {
    pub(crate) fn new(repository: AgentRepository) -> Self {
        Self { repository }
    }

    pub(crate) fn repository(&self) -> &AgentRepository {
        &self.repository
    }
}
