// Copyright (c) 2023 Nick Piaddo
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested partition tables (MBR extended, GPT, BSD disklabels…), exposed as a flat
//! pre-order list.

// From dependency library

// From standard library

// From this library
pub use partition_iter_struct::PartitionIter;
pub use partition_struct::Partition;
pub use partition_table_struct::PartitionTable;

mod partition_iter_struct;
mod partition_struct;
mod partition_table_struct;
