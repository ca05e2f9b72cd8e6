use crate::domain::entity::{EntityId, EntityKind};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NmlError {
    #[error("Identification must be an absolute URI with a scheme, got {value:?}")]
    Identification { value: String },

    #[error("existsDuring expects a Lifetime, got {found}")]
    ExistsDuring { found: EntityKind },

    #[error("isAlias expects another {expected}, got {found}")]
    IsAlias {
        expected: EntityKind,
        found: EntityKind,
    },

    #[error("{service} can only provide a Port or PortGroup, got {found}")]
    CanProvidePort {
        service: EntityKind,
        found: EntityKind,
    },

    #[error("Expected a service, got {found}")]
    NotAService { found: EntityKind },

    #[error("Entity {0} does not belong to this graph")]
    EntityNotFound(EntityId),

    #[error("{0} has no element form and cannot be serialized")]
    NotSerializable(EntityKind),

    #[error("Topology description error: {message}")]
    Description { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl NmlError {
    pub fn description(message: impl Into<String>) -> Self {
        NmlError::Description {
            message: message.into(),
        }
    }

    /// Whether the error came from a rejected mutation on the object model.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            NmlError::Identification { .. }
                | NmlError::ExistsDuring { .. }
                | NmlError::IsAlias { .. }
                | NmlError::CanProvidePort { .. }
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NmlError::Identification { .. } => {
                "Use an absolute URI such as urn:ogf:network:example.org:2013:node"
            }
            NmlError::ExistsDuring { .. } => "Only Lifetime entities can be attached with existsDuring",
            NmlError::IsAlias { .. } => "Alias objects must be of the same kind",
            NmlError::CanProvidePort { .. } => "Pass a Port or PortGroup handle",
            NmlError::NotAService { .. } => {
                "Use a SwitchingService, AdaptationService or DeadaptationService"
            }
            NmlError::EntityNotFound(_) => "Serialize handles obtained from the same graph",
            NmlError::NotSerializable(_) => "Relate the object through a relation that has an element form",
            NmlError::Description { .. } => "Check the keys and references in the description file",
            NmlError::Io(_) => "Check that the file exists and is readable",
            NmlError::TomlParse(_) => "Check the description file is valid TOML",
        }
    }
}

pub type Result<T> = std::result::Result<T, NmlError>;
