//! Middleware pipeline stage model.
//!
//! The HTTP pipeline has a fixed stage order: secure-transport
//! enforcement, documentation exposure (optional), authorization
//! enforcement, endpoint dispatch. `create_app` assembles stages from
//! [`Stage::canonical`]; [`validate_stage_order`] encodes the ordering
//! invariant so the test suite can flag any rearrangement.

use thiserror::Error;

/// One passthrough stage of the request pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// API documentation endpoints; public, bypassable with no
    /// functional impact.
    Docs,
    /// Redirects insecure requests before credentials can travel over
    /// plain HTTP.
    SecureTransport,
    /// Rejects unauthorized requests before they reach a handler.
    Authorization,
    /// Routes the request to the matching handler.
    Dispatch,
}

/// Violations of the required stage ordering.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("required stage {missing:?} is absent")]
    MissingStage { missing: Stage },
    #[error("stage {earlier:?} must run before {later:?}")]
    MisorderedStage { earlier: Stage, later: Stage },
}

impl Stage {
    /// The canonical assembly order used by `create_app`.
    ///
    /// Secure transport runs outermost, so even documentation requests
    /// get redirected off plain HTTP.
    pub fn canonical(docs_enabled: bool) -> Vec<Stage> {
        let mut stages = Vec::with_capacity(4);
        stages.push(Stage::SecureTransport);
        if docs_enabled {
            stages.push(Stage::Docs);
        }
        stages.extend([Stage::Authorization, Stage::Dispatch]);
        stages
    }
}

/// Validate a pipeline arrangement against the ordering invariant.
///
/// Secure transport must precede authorization (credentials otherwise
/// travel unencrypted), and authorization must precede dispatch (no
/// access-control guarantee otherwise). Docs, when present, must sit in
/// front of authorization so it stays reachable without credentials.
pub fn validate_stage_order(stages: &[Stage]) -> Result<(), PipelineError> {
    let position = |stage: Stage| stages.iter().position(|s| *s == stage);
    let require = |stage: Stage| {
        position(stage).ok_or(PipelineError::MissingStage { missing: stage })
    };

    let secure = require(Stage::SecureTransport)?;
    let authorization = require(Stage::Authorization)?;
    let dispatch = require(Stage::Dispatch)?;

    if secure >= authorization {
        return Err(PipelineError::MisorderedStage {
            earlier: Stage::SecureTransport,
            later: Stage::Authorization,
        });
    }
    if authorization >= dispatch {
        return Err(PipelineError::MisorderedStage {
            earlier: Stage::Authorization,
            later: Stage::Dispatch,
        });
    }
    if let Some(docs) = position(Stage::Docs) {
        if docs > authorization {
            return Err(PipelineError::MisorderedStage {
                earlier: Stage::Docs,
                later: Stage::Authorization,
            });
        }
    }

    Ok(())
}
