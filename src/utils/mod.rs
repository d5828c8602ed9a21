pub mod time;

pub fn longid() -> String {
    nanoid::nanoid!()
}
