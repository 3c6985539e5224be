//! # Embedding Delegate
//!
//! Bridges a host UI container and a long-lived engine.
//!
//! ## Philosophy
//!
//! - **Orchestrate, don't reimplement**: The host decides, the engine does;
//!   the delegate only sequences the two
//! - **Validated lifecycle**: Host callbacks that arrive out of order are
//!   rejected before anything reaches the engine
//! - **Explicit subscriptions**: The first-frame listener is a handle that is
//!   returned on detach
//! - **Injected bootstrap**: Engines the host does not supply are built by a
//!   factory handed in at construction
//!
//! ## Example
//!
//! ```
//! use embedding_delegate::{EmbeddingDelegate, TopLevelHost};
//! use host_config::HostConfig;
//! use sim_engine::SimEngineFactory;
//! use std::rc::Rc;
//!
//! let host = Rc::new(TopLevelHost::new("main", HostConfig::default()).unwrap());
//! let mut delegate = EmbeddingDelegate::new(host, Box::new(SimEngineFactory::new()));
//!
//! delegate.attach().unwrap();
//! delegate.on_create_view().unwrap();
//! delegate.start().unwrap();
//! delegate.resume().unwrap();
//! assert!(delegate.has_entered_start());
//!
//! delegate.pause().unwrap();
//! delegate.stop().unwrap();
//! delegate.on_destroy_view().unwrap();
//! assert!(delegate.detach().is_none());
//! ```
//!
//! ## Non-Goals
//!
//! This is NOT:
//! - A rendering surface
//! - A plugin registry
//! - A channel codec

pub mod delegate;
pub mod error;
pub mod hosts;
pub mod resolver;
pub mod view;

pub use delegate::{EmbeddingDelegate, LOG_COMPONENT};
pub use error::DelegateError;
pub use hosts::{
    EmbeddedHost, EngineConfigurator, FirstFrameCallback, PlatformPluginProvider, TopLevelHost,
};
pub use resolver::{EngineResolver, EngineSource, ResolvedEngine};
pub use view::{push_platform_configuration, EmbeddingView};
