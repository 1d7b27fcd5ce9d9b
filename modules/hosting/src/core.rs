//! Hosting core domain modules (no_std).

pub mod actor_interface;
pub mod actor_key;
pub mod actor_kind;
pub mod actor_ref;
pub mod capability_answer;
pub mod capability_query_error;
pub mod hosting_config;
pub mod hosting_error;
pub mod node_address;
pub mod node_state;
pub mod node_type;
pub mod selection_rng;

pub use actor_interface::ActorInterface;
pub use actor_key::ActorKey;
pub use actor_kind::ActorKind;
pub use actor_ref::ActorRef;
pub use capability_answer::CapabilityAnswer;
pub use capability_query_error::CapabilityQueryError;
pub use hosting_config::HostingConfig;
pub use hosting_error::HostingError;
pub use node_address::NodeAddress;
pub use node_state::NodeState;
pub use node_type::NodeType;
pub use selection_rng::SelectionRng;
