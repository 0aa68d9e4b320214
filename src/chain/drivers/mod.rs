// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The three concrete [`ChainDriver`](crate::chain::ChainDriver) implementations, one per
//! [`ChainKind`](crate::chain::ChainKind). Each is a unit struct wrapping one of the
//! identifier tables declared in [`identify`](crate::identify) and delegating iteration to
//! [`dispatch`](crate::chain::dispatch).

// From dependency library

// From standard library

// From this library

pub use partitions::PartitionsDriver;
pub use superblocks::SuperblocksDriver;
pub use topology::TopologyDriver;

mod partitions;
mod superblocks;
mod topology;
