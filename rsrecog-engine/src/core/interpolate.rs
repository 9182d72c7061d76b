use rustc_hash::FxHashMap;

/// 参数表：参数名 → 参数值
/// 值为None表示分组已声明但未参与匹配，插值时按字面`-`处理
pub type ParamMap = FxHashMap<String, Option<String>>;

/// 保留键后缀，仅以此结尾的参数值参与插值展开
pub const CPE_SUFFIX: &str = ".cpe23";

/// 参数表模板插值（就地修改）
///
/// 对键以`key_ends_with`结尾的每个条目（无过滤时为全部条目），将其值视为
/// 含`{otherKey}`占位符的模板：对参数表全部条目（含自身）做一遍折叠替换，
/// 占位符替换为对应条目的值，值为None时替换为字面`-`；替换完成后剥离至多
/// 一个尾部`:`。
///
/// 单遍折叠，不递归解析替换引入的新占位符。折叠顺序不指定，互相引用的
/// 模板（a含`{b}`且b含`{a}`）结果依赖遍历顺序，目录作者需避免此类循环。
pub fn interpolate(key_ends_with: Option<&str>, params: &mut ParamMap) {
    let keys: Vec<String> = params
        .keys()
        .filter(|key| key_ends_with.map_or(true, |suffix| key.ends_with(suffix)))
        .cloned()
        .collect();

    for key in keys {
        let template = match params.get(&key) {
            Some(Some(value)) => value.clone(),
            // 值缺失的条目不做插值
            _ => continue,
        };

        let mut resolved = template;
        for (name, value) in params.iter() {
            let placeholder = format!("{{{}}}", name);
            resolved = resolved.replace(&placeholder, value.as_deref().unwrap_or("-"));
        }

        // 尾部冒号仅剥离一个
        if resolved.ends_with(':') {
            resolved.pop();
        }

        params.insert(key, Some(resolved));
    }
}
