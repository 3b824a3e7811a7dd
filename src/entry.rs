/// Synthesizes the virtual mount-point module for one project.
///
/// The emitted module dynamically imports the project file, takes its
/// default export as the root component, and mounts it under strict mode
/// into the page's `#root` element. Pure: identical inputs always
/// produce byte-identical source text.
pub fn entry_code(project_file_name: &str, src_dir: &str) -> String {
    let import_path = format!("{src_dir}/{project_file_name}").replace('\\', "/");
    format!(
        r#"
import * as React from 'react';
import {{ createRoot }} from 'react-dom/client';

const loadApp = async () => {{
  const mod = await import('./{import_path}');
  return mod.default;
}};

loadApp().then(App => {{
  const root = document.getElementById('root');
  if (!root) throw new Error('react-mpx: #root element not found in index.html');
  createRoot(root).render(
    React.createElement(React.StrictMode, null,
      React.createElement(App, null)
    )
  );
}}).catch(err => {{
  console.error('Failed to load project "{project_file_name}":', err);
  throw err;
}});
"#
    )
}
