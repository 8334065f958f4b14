pub(crate) mod randomsample;
