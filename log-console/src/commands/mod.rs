/// 控制台命令模块
///
/// 界面可调用的全部操作,统一返回 `Result<T, String>`:
/// - log_commands: 拉取、生成日志与健康检查
/// - compose_commands: 自定义日志表单
/// - view_commands: 过滤、展开与渲染

pub mod compose_commands;
pub mod log_commands;
pub mod view_commands;
