//! Network messages - communication between App and Network layers

use crate::models::{RequestDescriptor, ResponsePayload};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute one resolved request
    ExecuteRequest {
        id: u64,
        descriptor: RequestDescriptor,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A response arrived (any status code)
    Completed { id: u64, payload: ResponsePayload },
    /// Transport-level failure; terminal for that request
    Failed { id: u64, message: String },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
            NetworkResponse::Failed { id, .. } => *id,
        }
    }
}
