/// Returns the number of physical CPU cores available on the system.
///
/// Used to size the trainer's default worker count when the caller doesn't
/// pin one explicitly. Mirrors the teacher's own `num_cpus::get_physical()`
/// call in `io/prefs.rs` rather than `std::thread::available_parallelism`,
/// which counts logical cores and would oversubscribe on SMT machines for
/// training's CPU-bound, per-model passes.
pub fn count_cores() -> usize {
    num_cpus::get_physical().max(1)
}
