// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters that discover input targets from concrete view hierarchies.

pub mod view_tree;
