use maskjson::MaskJson;

#[derive(MaskJson)]
struct Profile {
    #[json(flatten)]
    pub name: String,
}

fn main() {}
