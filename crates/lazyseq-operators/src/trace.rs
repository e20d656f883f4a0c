//! Tracing hooks for index builds and materialization.
//!
//! Compiled to no-ops unless the `tracing` feature is enabled; wire a
//! subscriber up in the binary layer.

#[cfg(feature = "tracing")]
pub fn emit(event: &'static str, key_values: &[(&'static str, usize)]) {
    let span = tracing::trace_span!("lazyseq", event);
    let _entered = span.enter();
    for (k, v) in key_values {
        tracing::trace!(%event, key = %k, value = *v, "stat");
    }
}

#[cfg(not(feature = "tracing"))]
pub fn emit(_event: &'static str, _key_values: &[(&'static str, usize)]) { /* no-op */
}
