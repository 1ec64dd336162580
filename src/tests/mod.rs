//! rinex-obs cross module tests

mod decoding;
