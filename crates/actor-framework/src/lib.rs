//! # Actor Framework
//!
//! Building blocks for hosting typed, in-memory record stores as Tokio actors. Each record type gets
//! one [`ResourceActor`] that owns its store and answers CRUD, listing and custom actions over a
//! channel; callers hold a cheap, cloneable [`ResourceClient`].
//!
//! The `quote-merger` sandbox org is built from four of these actors (opportunities, quotes, quote line
//! groups, quote lines). Linkage checks such as "a line's group must belong to the same quote" live in
//! the entity hooks, which receive clients of the other actors as their context.
//!
//! ## Architecture Overview
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - record shape and validation hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - message processing, id generation, storage
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed requests and error mapping
//!
//! ## Defining an entity
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Quote {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Debug)] struct QuoteCreate { name: String }
//! #[derive(Debug)] struct QuoteUpdate { name: Option<String> }
//! #[derive(Debug)] enum QuoteAction {}
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("quote error: {0}")]
//! struct QuoteError(String);
//!
//! #[async_trait]
//! impl ActorEntity for Quote {
//!     type Id = u32;
//!     type Create = QuoteCreate;
//!     type Update = QuoteUpdate;
//!     type Action = QuoteAction;
//!     type ActionResult = ();
//!     type Context = ();
//!     type Error = QuoteError;
//!
//!     fn from_create_params(id: u32, params: QuoteCreate) -> Result<Self, Self::Error> {
//!         if params.name.is_empty() {
//!             return Err(QuoteError("name is required".into()));
//!         }
//!         Ok(Self { id, name: params.name })
//!     }
//!
//!     async fn on_update(&mut self, update: QuoteUpdate, _ctx: &()) -> Result<(), Self::Error> {
//!         if let Some(name) = update.name { self.name = name; }
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, _: QuoteAction, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Quote>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(QuoteCreate { name: "Q-0001".into() }).await.unwrap();
//!     let quote = client.get(id).await.unwrap().unwrap();
//!     assert_eq!(quote.name, "Q-0001");
//!     assert!(client.create(QuoteCreate { name: String::new() }).await.is_err());
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are passed to `run()`, not to `new()`. All actors are created first, then each is
//! started with the clients it needs, so two actors can depend on each other.
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor, ResourceClient};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Quote { id: u32 }
//! # #[derive(Debug)] struct QuoteCreate;
//! # #[derive(Debug)] struct QuoteUpdate;
//! # #[derive(Debug)] enum QuoteAction {}
//! # #[derive(Debug, thiserror::Error)] #[error("quote")] struct QuoteError;
//! # #[async_trait]
//! # impl ActorEntity for Quote {
//! #     type Id = u32; type Create = QuoteCreate; type Update = QuoteUpdate; type Action = QuoteAction;
//! #     type ActionResult = (); type Context = (); type Error = QuoteError;
//! #     fn from_create_params(id: u32, _: QuoteCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
//! #     async fn on_update(&mut self, _: QuoteUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! #     async fn handle_action(&mut self, _: QuoteAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! #[derive(Clone, Debug)] struct Line { id: u32, quote: u32 }
//! #[derive(Debug)] struct LineCreate { quote: u32 }
//! #[derive(Debug)] struct LineUpdate;
//! #[derive(Debug)] enum LineAction {}
//! #[derive(Debug, thiserror::Error)] #[error("unknown quote {0}")] struct LineError(u32);
//!
//! #[async_trait]
//! impl ActorEntity for Line {
//!     type Id = u32; type Create = LineCreate; type Update = LineUpdate; type Action = LineAction;
//!     type ActionResult = ();
//!     type Context = ResourceClient<Quote>;
//!     type Error = LineError;
//!
//!     fn from_create_params(id: u32, p: LineCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, quote: p.quote })
//!     }
//!     async fn on_create(&mut self, quotes: &ResourceClient<Quote>) -> Result<(), Self::Error> {
//!         match quotes.get(self.quote).await {
//!             Ok(Some(_)) => Ok(()),
//!             _ => Err(LineError(self.quote)),
//!         }
//!     }
//!     async fn on_update(&mut self, _: LineUpdate, _: &ResourceClient<Quote>) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: LineAction, _: &ResourceClient<Quote>) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (quote_actor, quote_client) = ResourceActor::<Quote>::new(10);
//!     let (line_actor, line_client) = ResourceActor::<Line>::new(10);
//!
//!     tokio::spawn(quote_actor.run(()));
//!     tokio::spawn(line_actor.run(quote_client.clone()));
//!
//!     let quote = quote_client.create(QuoteCreate).await.unwrap();
//!     assert!(line_client.create(LineCreate { quote }).await.is_ok());
//!     assert!(line_client.create(LineCreate { quote: 99 }).await.is_err());
//! }
//! ```
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Requests to one actor are processed sequentially, so the store needs no locks
//! - Listings are ordered by id, which for generated ids is creation order
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers a real `ResourceClient<T>` from scripted expectations, which makes it
//! easy to fail exactly one create in a sequence. See the [`mock`] module.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod tracing;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
