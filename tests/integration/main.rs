//! Integration tests: fetcher fallback and the full ROI pipeline,
//! driven through a scripted in-memory transport.

mod scripted_transport;
mod market_fallback;
mod roi_pipeline;
