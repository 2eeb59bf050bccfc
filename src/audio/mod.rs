pub mod block;
pub mod capture;
pub mod cpal_host;
pub mod device;
pub mod gain;
pub mod queue;

#[cfg(test)]
pub mod fake;
