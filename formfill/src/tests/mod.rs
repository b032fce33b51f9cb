mod field_tests;

use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::FormError;
use crate::fields::FieldElement;
use crate::types::FieldValue;

// Initialize tracing for tests
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()))
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Collects everything logged while [`run`](LogCapture::run) executes.
#[derive(Debug, Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn run<T>(&self, body: impl FnOnce() -> T) -> T {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, body)
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[derive(Debug)]
struct ScriptState {
    reads: VecDeque<FieldValue>,
    fallback: FieldValue,
    set_calls: usize,
    read_calls: usize,
    written: Vec<FieldValue>,
}

/// Field double whose read-back values are scripted in advance.
///
/// Queued reads are returned first, then `fallback` forever. Clones share
/// state so a test can count calls after handing one clone to a form.
#[derive(Debug, Clone)]
pub struct ScriptedField {
    state: Arc<Mutex<ScriptState>>,
    show_in_log: bool,
    allow_check: bool,
}

impl ScriptedField {
    pub fn reading(fallback: impl Into<FieldValue>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScriptState {
                reads: VecDeque::new(),
                fallback: fallback.into(),
                set_calls: 0,
                read_calls: 0,
                written: Vec::new(),
            })),
            show_in_log: true,
            allow_check: true,
        }
    }

    pub fn then_reading(self, value: impl Into<FieldValue>) -> Self {
        {
            let mut state = self.state();
            let first = std::mem::replace(&mut state.fallback, value.into());
            state.reads.push_back(first);
        }
        self
    }

    pub fn hidden(mut self) -> Self {
        self.show_in_log = false;
        self
    }

    pub fn set_calls(&self) -> usize {
        self.state().set_calls
    }

    pub fn read_calls(&self) -> usize {
        self.state().read_calls
    }

    pub fn written(&self) -> Vec<FieldValue> {
        self.state().written.clone()
    }

    fn state(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap()
    }
}

impl FieldElement for ScriptedField {
    fn value(&self) -> Result<FieldValue, FormError> {
        let mut state = self.state();
        state.read_calls += 1;
        let fallback = state.fallback.clone();
        Ok(state.reads.pop_front().unwrap_or(fallback))
    }

    fn set_value(&self, value: &FieldValue) -> Result<(), FormError> {
        let mut state = self.state();
        state.set_calls += 1;
        state.written.push(value.clone());
        Ok(())
    }

    fn show_in_log(&self) -> bool {
        self.show_in_log
    }

    fn allow_check(&self) -> bool {
        self.allow_check
    }

    fn kind(&self) -> &'static str {
        "Scripted"
    }
}
