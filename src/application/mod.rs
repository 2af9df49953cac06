pub mod create_form;
pub mod todo_list;
pub mod update_flow;

#[cfg(test)]
pub(crate) mod test_support;
