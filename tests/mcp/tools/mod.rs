mod keys;
mod lookup;
