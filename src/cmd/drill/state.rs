// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tokio::sync::oneshot;

use crate::engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub typing_speed: u32,
    pub sound: bool,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<oneshot::Sender<()>>>>,
}

pub struct MutableState {
    pub engine: Engine,
    /// An error from the last action, shown once on the next page load.
    pub error: Option<String>,
}

impl ServerState {
    pub fn acquire(&self) -> MutexGuard<'_, MutableState> {
        self.mutable.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Ask the server to stop. Only the first call has an effect.
    pub fn shutdown(&self) {
        let mut tx = self.shutdown_tx.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = tx.take() {
            let _ = tx.send(());
        }
    }
}
