// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Huang Rui <vowstar@gmail.com>

//! Layer metadata: names and purposes for `(index, sub_index)` layer keys.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::LayerKey;

/// One row of the layer table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerInfo {
    pub index: u32,
    pub sub_index: u32,
    pub name: String,
    #[serde(default)]
    pub purpose_description: String,
    #[serde(default)]
    pub purpose_type: String,
}

impl LayerInfo {
    /// Layer name as understood by `SetActiveLayerByName`, e.g. `met1.drawing`.
    pub fn full_name(&self) -> String {
        if self.purpose_description.is_empty() {
            self.name.clone()
        } else {
            format!("{}.{}", self.name, self.purpose_description)
        }
    }

    /// Comment line text, e.g. `met1.drawing [DRAWING] 68/20`.
    pub fn comment(&self) -> String {
        let mut comment = self.full_name();
        if !self.purpose_type.is_empty() && self.purpose_type != "UNKNOWN" {
            comment.push_str(&format!(" [{}]", self.purpose_type));
        }
        comment.push_str(&format!(" {}/{}", self.index, self.sub_index));
        comment
    }
}

#[derive(Debug, Clone, Default)]
pub struct Technology {
    layers: HashMap<(u32, u32), LayerInfo>,
}

impl Technology {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);

        let mut technology = Self::new();
        for record in csv_reader.deserialize() {
            let info: LayerInfo = record?;
            debug!("[TECH] {}", info.comment());
            technology.insert(info);
        }
        Ok(technology)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        info!("[LOAD] Loading layer table: {}", path.as_ref().display());
        let file = std::fs::File::open(path)?;
        let technology = Self::from_csv_reader(file)?;
        info!("[INFO] {} layers known", technology.len());
        Ok(technology)
    }

    /// Later rows replace earlier rows with the same key.
    pub fn insert(&mut self, info: LayerInfo) {
        self.layers.insert((info.index, info.sub_index), info);
    }

    pub fn lookup(&self, layer: LayerKey) -> Option<&LayerInfo> {
        self.layers.get(&(layer.number, layer.purpose))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}
