use maskjson::MaskJson;

#[derive(MaskJson)]
union Bits {
    pub int: u32,
    pub float: f32,
}

fn main() {}
