//! rskeycat 命令行入口

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rskeycat::{
    App, FileSlot, GlobalConfig, Notice, NoticeLevel, ResultQuery, SortOrder, TemplatePreset,
    export_file_name,
};

#[derive(Parser, Debug)]
#[command(name = "rskeycat", version, about = "基于关键词分类的代码评分工具")]
struct Cli {
    /// 本地存储文件路径
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// 输出详细日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 对代码文件评分
    Check {
        /// 代码文件（.dart / .txt）
        #[arg(long)]
        code: PathBuf,
        /// 分类集 JSON 文件
        #[arg(long)]
        categories: Option<PathBuf>,
        /// 加载预置模板（可多次指定）
        #[arg(long = "template")]
        templates: Vec<String>,
        /// 检查关键词（默认使用全部分类关键词）
        #[arg(long)]
        keywords: Option<String>,
        /// 手动加减分
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        manual: String,
        /// 按分类名过滤展示
        #[arg(long)]
        filter: Option<String>,
        /// 以该姓名保存成绩
        #[arg(long)]
        save: Option<String>,
        /// 以 JSON 输出评分报告
        #[arg(long)]
        json: bool,
        /// 将本次使用的分类集导出为 JSON
        #[arg(long)]
        export_categories: Option<PathBuf>,
    },
    /// 列出已保存的成绩
    Results {
        /// 按姓名搜索
        #[arg(long)]
        search: Option<String>,
        /// 排序方式：date-desc / date-asc / name / score-desc / score-asc
        #[arg(long, default_value = "date-desc")]
        sort: String,
    },
    /// 导出成绩为 CSV
    Export {
        /// 输出文件，默认 results_<日期>.csv
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// 删除全部成绩
    ClearResults,
    /// 列出预置模板
    Templates,
    /// 代码统计，提供分类时附带逐分类命中数
    Stats {
        #[arg(long)]
        code: PathBuf,
        #[arg(long)]
        categories: Option<PathBuf>,
        #[arg(long = "template")]
        templates: Vec<String>,
    },
    /// 查看或切换主题偏好
    Theme {
        #[arg(long)]
        toggle: bool,
    },
}

fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 输出提示，警告与错误转为命令失败
fn report(notice: Notice) -> Result<()> {
    match notice.level {
        NoticeLevel::Success | NoticeLevel::Info => {
            eprintln!("{}", notice);
            Ok(())
        }
        NoticeLevel::Warning | NoticeLevel::Error => bail!("{}", notice.message),
    }
}

/// 加载分类文件与模板，检查关键词默认取全部分类关键词
fn prepare_categories(
    app: &mut App<FileSlot>,
    categories: Option<PathBuf>,
    templates: &[String],
    keywords: Option<String>,
) -> Result<()> {
    if let Some(path) = categories {
        let notice = app.on_import_categories(&path);
        // 部分分类被跳过时仅提示
        if notice.level == NoticeLevel::Error || app.categories().is_empty() {
            bail!("{}", notice.message);
        }
        eprintln!("{}", notice);
    }
    for key in templates {
        report(app.on_load_template(key))?;
    }

    let check_keywords = keywords.unwrap_or_else(|| {
        app.categories()
            .iter()
            .flat_map(|c| c.keywords.iter().cloned())
            .collect::<Vec<_>>()
            .join(" ")
    });
    app.set_check_keywords(check_keywords);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut builder = GlobalConfig::builder().verbose(cli.verbose);
    if let Some(data) = cli.data {
        builder = builder.data_path(data);
    }
    let config = builder.build();
    init_logging(config.log_level());

    let mut app: App<FileSlot> = App::open(config);

    match cli.command {
        Command::Check {
            code,
            categories,
            templates,
            keywords,
            manual,
            filter,
            save,
            json,
            export_categories,
        } => {
            prepare_categories(&mut app, categories, &templates, keywords)?;
            if let Some(path) = export_categories {
                report(app.on_export_categories(&path))?;
            }
            report(app.on_import_file(&code))?;
            if app.last_report().is_none() {
                report(app.on_check_code())?;
            }
            app.set_manual_score(manual);

            if json {
                let score_report = app.last_report().context("评分结果为空")?;
                println!("{}", serde_json::to_string_pretty(score_report)?);
            } else {
                for line in app.report_lines(filter.as_deref()) {
                    println!("{}", line);
                }
                if let Some(score_report) = app.last_report() {
                    println!("Total matches: {}", score_report.total_matched);
                }
            }

            if let Some(name) = save {
                report(app.on_save_result(&name))?;
            }
        }
        Command::Results { search, sort } => {
            let mut query = ResultQuery::new().sort(sort.parse::<SortOrder>()?);
            if let Some(term) = search {
                query = query.search(term);
            }
            let records = app.results(&query);
            if records.is_empty() {
                println!("暂无成绩记录");
            }
            for r in records {
                println!(
                    "{:>4}  {:<20}  {:>5}  {}",
                    r.id,
                    r.name,
                    r.total_score,
                    r.timestamp.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
        Command::Export { output } => {
            let csv = app.export_csv()?;
            let path = output
                .unwrap_or_else(|| PathBuf::from(export_file_name(chrono::Local::now().date_naive())));
            fs::write(&path, csv).with_context(|| format!("写入 {} 失败", path.display()))?;
            report(Notice::success(format!("CSV 已导出：{}", path.display())))?;
        }
        Command::ClearResults => report(app.on_delete_all_results())?,
        Command::Templates => {
            for preset in TemplatePreset::ALL {
                let category = preset.to_category();
                println!("{:<10} {}", preset.key(), category);
            }
        }
        Command::Stats {
            code,
            categories,
            templates,
        } => {
            prepare_categories(&mut app, categories, &templates, None)?;
            // 有分类时导入即自动评分
            report(app.on_import_file(&code))?;
            for line in app.stats_lines() {
                println!("{}", line);
            }
        }
        Command::Theme { toggle } => {
            if toggle {
                report(app.on_toggle_theme())?;
            }
            println!("dark_mode = {}", app.dark_mode());
        }
    }

    Ok(())
}
