pub mod a001_producer;
