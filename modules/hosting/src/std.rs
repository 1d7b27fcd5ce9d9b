//! std-only runtime adapters for the hosting subsystem.

mod activation_executor;
mod cluster_peer;
mod distributed_directory;
mod hosting;
mod in_memory_directory;
mod local_cluster_network;
mod local_cluster_peer;
mod node_capabilities;
mod node_record;

pub use activation_executor::ActivationExecutor;
pub use cluster_peer::{ClusterPeer, ViewListener};
pub use distributed_directory::DistributedDirectory;
pub use hosting::Hosting;
pub use in_memory_directory::InMemoryDirectory;
pub use local_cluster_network::LocalClusterNetwork;
pub use local_cluster_peer::LocalClusterPeer;
pub use node_capabilities::{BoxFuture, NodeCapabilities};
pub use node_record::NodeRecord;
