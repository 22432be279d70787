//! 宿主协作接口
//! 内核只通过这些窄接口读取资源表、chunk 列表与输出选项

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::hash::BuildHasher;

/// 资源表：输出文件名 → 编译后源码
pub trait AssetRegistry {
    /// 资源源码；不存在返回None
    fn asset_source(&self, name: &str) -> Option<Cow<'_, str>>;

    /// 全部资源名（快照）
    fn asset_names(&self) -> Vec<String>;

    /// 删除资源，返回是否存在
    fn remove_asset(&mut self, name: &str) -> bool;
}

impl<S: BuildHasher> AssetRegistry for HashMap<String, String, S> {
    fn asset_source(&self, name: &str) -> Option<Cow<'_, str>> {
        self.get(name).map(|s| Cow::Borrowed(s.as_str()))
    }

    fn asset_names(&self) -> Vec<String> {
        self.keys().cloned().collect()
    }

    fn remove_asset(&mut self, name: &str) -> bool {
        self.remove(name).is_some()
    }
}

/// 构建产出的 chunk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChunkInfo {
    /// initial chunk 随页面加载；否则为按需加载的 async chunk
    #[serde(default)]
    pub initial: bool,
    #[serde(default)]
    pub files: Vec<String>,
}

impl ChunkInfo {
    pub fn initial<I, T>(files: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            initial: true,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn non_initial<I, T>(files: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            initial: false,
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

/// 去掉 publicPath 前缀：最后一个 `/` 及其之前的全部内容
static PUBLIC_PATH_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*/").unwrap());

/// 宿主输出选项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    #[serde(default)]
    pub public_path: Option<String>,
    /// 文件名是否带 `?hash` 查询后缀
    #[serde(default)]
    pub hash: bool,
}

impl OutputOptions {
    pub fn new(public_path: Option<String>, hash: bool) -> Self {
        Self { public_path, hash }
    }

    /// 原始引用 → 逻辑资源名
    pub fn script_name<'a>(&self, raw: &'a str) -> &'a str {
        // 先去查询串，避免查询串中的 `/` 干扰前缀截断
        let without_query = if self.hash {
            raw.split('?').next().unwrap_or(raw)
        } else {
            raw
        };
        match PUBLIC_PATH_PREFIX.find(without_query) {
            Some(prefix) => &without_query[prefix.end()..],
            None => without_query,
        }
    }

    /// chunk 文件名 → 带 publicPath 的引用
    pub fn asset_href(&self, file: &str) -> String {
        match self.public_path.as_deref() {
            Some(prefix) if !prefix.is_empty() => {
                if prefix.ends_with('/') {
                    format!("{}{}", prefix, file)
                } else {
                    format!("{}/{}", prefix, file)
                }
            }
            _ => file.to_string(),
        }
    }
}

/// 单次文档处理所需的宿主输入快照
pub struct HostContext<'a, A: AssetRegistry + ?Sized> {
    pub assets: &'a A,
    pub chunks: &'a [ChunkInfo],
    pub output: &'a OutputOptions,
}

impl<'a, A: AssetRegistry + ?Sized> HostContext<'a, A> {
    pub fn new(assets: &'a A, chunks: &'a [ChunkInfo], output: &'a OutputOptions) -> Self {
        Self {
            assets,
            chunks,
            output,
        }
    }
}
