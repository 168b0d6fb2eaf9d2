use maskjson::MaskJson;

#[derive(MaskJson)]
struct Profile {
    #[mask(partial)]
    pub phone: String,
}

fn main() {}
