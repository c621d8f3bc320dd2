// SPDX-License-Identifier: AGPL-3.0-or-later

pub mod schema;

pub mod dismissal;
pub mod edge;
pub mod playlist;
pub mod track;
