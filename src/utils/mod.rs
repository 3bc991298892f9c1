pub mod byte_size;
