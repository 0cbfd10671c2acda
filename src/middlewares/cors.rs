use actix_cors::Cors;

pub fn create_cors() -> Cors {
    Cors::default()
        .allowed_origin_fn(|_, _req_head| {
            // 落地页域名由各门店自定义, 放开来源; 生产环境可按需收紧
            true
        })
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        // 落地页无自定义鉴权 Header, 但放宽以防前端埋点附加字段触发预检失败
        .allow_any_header()
        .max_age(3600)
}
