use maskjson::MaskJson;

#[derive(MaskJson)]
enum Credential {
    Anonymous,
    Password { user: String },
}

fn main() {}
