// src/progress.rs
/// Lightweight progress reporting used by long-running operations (scan/import).
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of units (files or batches).
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One unit completed; `id` is its 1-based number, `count` the records it carried.
    fn item_done(&mut self, _id: usize, _count: usize) {}

    /// One unit failed; same arguments as `item_done`.
    fn item_failed(&mut self, _id: usize, _count: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Prints status lines to stdout.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    total: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.done = 0;
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn item_done(&mut self, id: usize, count: usize) {
        self.done += 1;
        println!("  [{id}/{}] ok ({count} records)", self.total);
    }
    fn item_failed(&mut self, id: usize, count: usize) {
        println!("  [{id}/{}] FAILED ({count} records)", self.total);
    }
    fn finish(&mut self) {
        if self.total > 0 {
            println!("Finished ({}/{})", self.done, self.total);
        }
    }
}
